//! Outbound Ports (Driven Ports / SPI)
//!
//! Everything the inbox reads but does not own: the delayed queue, the
//! poster allow-list and the executing host.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, BlockNumber, Gas, Hash, Timestamp};
use shared_types::errors::PortError;

/// Arrival metadata of one delayed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedMessage {
    pub block_number: BlockNumber,
    pub timestamp: Timestamp,
    /// Delayed queue accumulator after this message
    pub accumulator: Hash,
}

/// Read-only view of the delayed message queue.
pub trait DelayedQueueView: Send + Sync {
    /// Messages currently in the queue.
    fn delayed_message_count(&self) -> u64;

    /// Message at `index` (zero-based).
    fn delayed_message(&self, index: u64) -> Result<DelayedMessage, PortError>;
}

/// Poster allow-list, managed outside the inbox.
pub trait BatchPosterRegistry: Send + Sync {
    fn is_batch_poster(&self, account: &Address) -> bool;
}

/// Execution context of the current call.
pub trait HostEnvironment: Send + Sync {
    fn block_number(&self) -> BlockNumber;

    fn timestamp(&self) -> Timestamp;

    /// Account that signed the enclosing transaction.
    fn tx_origin(&self) -> Address;

    /// Price paid per gas unit by the current transaction.
    fn gas_price(&self) -> U256;

    /// Gas consumed so far by the current call.
    fn gas_used(&self) -> Gas;
}
