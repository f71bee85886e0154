//! Adapters for Gas Refund outbound ports.

pub mod transfer;

pub use transfer::RecordingTransfer;
