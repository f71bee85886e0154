//! Domain module for the Sequencer Inbox
//!
//! Contains entities, the accumulator chain, errors, and invariants.

pub mod accumulator;
pub mod entities;
pub mod errors;
pub mod invariants;

pub use accumulator::*;
pub use entities::*;
pub use errors::*;
