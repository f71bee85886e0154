//! Application layer for the Sequencer Inbox.

pub mod service;

pub use service::SequencerInboxService;
