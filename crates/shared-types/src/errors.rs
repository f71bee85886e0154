//! # Error Types
//!
//! Defines error types returned by outbound ports and shared across subsystems.

use crate::entities::Address;
use thiserror::Error;

/// Errors raised by adapters behind an outbound port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    /// The delayed queue has no message at this index.
    #[error("Delayed message {index} not found")]
    DelayedMessageNotFound { index: u64 },

    /// A native transfer was refused by the recipient or the host.
    #[error("Transfer to {recipient:?} rejected: {reason}")]
    TransferRejected { recipient: Address, reason: String },

    /// The host environment could not be reached.
    #[error("Host unavailable: {0}")]
    Unavailable(String),
}
