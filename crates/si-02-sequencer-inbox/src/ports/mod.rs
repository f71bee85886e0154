//! Ports module for the Sequencer Inbox
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::{InboxStatus, RefundOutcome, SequencerInboxApi, SubmitReceipt};
pub use outbound::{BatchPosterRegistry, DelayedMessage, DelayedQueueView, HostEnvironment};
