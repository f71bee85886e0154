//! # IPC Module
//!
//! Request/response payloads and the async handler that publishes the
//! resulting events on the shared bus.

pub mod handler;
pub mod payloads;

pub use handler::SequencerInboxHandler;
pub use payloads::*;
