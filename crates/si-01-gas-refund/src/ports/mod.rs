//! Ports module for Gas Refund
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::RefundPolicy;
pub use outbound::RefundTransfer;
