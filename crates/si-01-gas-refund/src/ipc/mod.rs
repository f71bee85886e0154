//! IPC Module for Gas Refund
//!
//! ## Security Boundaries
//!
//! - Allow-list changes and withdrawals: ledger operator ONLY
//! - Funding: anyone
//! - Refund requests never arrive over IPC; the sequencer calls the
//!   registry directly inside the submission step

pub mod handler;
pub mod payloads;

pub use handler::{refund_event, BudgetAdminHandler};
pub use payloads::*;
