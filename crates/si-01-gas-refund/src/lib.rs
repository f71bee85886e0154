//! # SI-01: Gas Refund Subsystem
//!
//! Reimburses batch posters for the settlement-layer cost of submitting a
//! batch, out of an externally funded budget.
//!
//! ## Architecture
//!
//! - **Domain**: `BudgetLedger`, the coarse `GasRefundBudget` and the
//!   rate-limited `GasRefundOptimized` policies
//! - **Ports**: Inbound (`RefundPolicy`) and Outbound (`RefundTransfer`)
//! - **Adapters**: In-memory transfer recorder
//! - **Application**: `RefundRegistry` keyed by refunder address
//! - **IPC**: Budget administration payloads and handler
//!
//! ## Policies
//!
//! ```text
//!                    ┌────────────────────┐
//!  RefundClaim ───→  │ RefundRegistry     │
//!                    │  refunder address  │
//!                    └─────────┬──────────┘
//!                ┌─────────────┴─────────────┐
//!                ▼                           ▼
//!      ┌──────────────────┐        ┌─────────────────────┐
//!      │ GasRefundBudget  │        │ GasRefundOptimized  │
//!      │ allow-list sets  │        │ one pair, clamps,   │
//!      │ no rate limit    │        │ epoch ceiling       │
//!      └────────┬─────────┘        └──────────┬──────────┘
//!               └─────────────┬───────────────┘
//!                             ▼
//!                     ┌──────────────┐
//!                     │ BudgetLedger │ ──→ RefundTransfer
//!                     └──────────────┘
//! ```
//!
//! A refund never fails the caller's primary operation: every denial is a
//! [`RefundDenied`] value that the caller logs and discards.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod ports;

pub use adapters::RecordingTransfer;
pub use application::registry::{RefundPolicyKind, RefundRegistry};
pub use config::OptimizedRefundConfig;
pub use domain::*;
pub use ipc::{BudgetAdminCommand, BudgetAdminHandler, BudgetAdminRequest, BudgetAdminResponse};
pub use ports::inbound::RefundPolicy;
pub use ports::outbound::RefundTransfer;

/// Subsystem label used in structured logs.
pub const SUBSYSTEM: &str = "gas-refund";
