//! # Shared Types Crate
//!
//! This crate contains the primitive aliases, batch metadata and error types
//! used by both the gas-refund and the sequencer-inbox subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Host-Agnostic**: Nothing in here knows how the settlement layer is
//!   reached; block numbers, timestamps and balances are plain values.

pub mod entities;
pub mod errors;
pub mod hashing;

pub use entities::*;
pub use errors::*;
pub use hashing::{keccak256, keccak256_concat};
