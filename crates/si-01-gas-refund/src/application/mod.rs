//! Application layer for Gas Refund.

pub mod registry;

pub use registry::{RefundPolicyKind, RefundRegistry};
