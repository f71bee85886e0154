//! Domain module for Gas Refund
//!
//! Contains the ledger, both refund policies, value objects and errors.

pub mod budget;
pub mod errors;
pub mod invariants;
pub mod ledger;
pub mod optimized;
pub mod value_objects;

pub use budget::GasRefundBudget;
pub use errors::*;
pub use ledger::BudgetLedger;
pub use optimized::GasRefundOptimized;
pub use value_objects::*;
