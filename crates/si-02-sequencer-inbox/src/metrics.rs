//! # Sequencer Metrics
//!
//! Prometheus counters for batch acceptance and refund outcomes.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! si-02-sequencer-inbox = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `sequencer_batches_accepted_total` - Counter of accepted batches
//! - `sequencer_batches_rejected_total` - Counter of rejected submissions (by reason)
//! - `sequencer_refund_paid_wei_total` - Counter of wei paid out as refunds
//! - `sequencer_refunds_denied_total` - Counter of denied refunds (by reason)

use primitive_types::U256;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total batches accepted
    pub static ref BATCHES_ACCEPTED: IntCounter = register_int_counter!(
        "sequencer_batches_accepted_total",
        "Total number of batches appended to the inbox"
    )
    .expect("Failed to create BATCHES_ACCEPTED metric");

    /// Total submissions rejected, labeled by reason
    pub static ref BATCHES_REJECTED: IntCounterVec = register_int_counter_vec!(
        "sequencer_batches_rejected_total",
        "Total number of rejected batch submissions",
        &["reason"]
    )
    .expect("Failed to create BATCHES_REJECTED metric");

    /// Total wei paid out as refunds
    pub static ref REFUND_PAID_WEI: IntCounter = register_int_counter!(
        "sequencer_refund_paid_wei_total",
        "Total wei reimbursed to batch posters"
    )
    .expect("Failed to create REFUND_PAID_WEI metric");

    /// Total refunds denied, labeled by reason
    pub static ref REFUNDS_DENIED: IntCounterVec = register_int_counter_vec!(
        "sequencer_refunds_denied_total",
        "Total number of refunds that paid nothing",
        &["reason"]
    )
    .expect("Failed to create REFUNDS_DENIED metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Clamp a wei amount into a counter increment.
#[cfg_attr(not(feature = "metrics"), allow(dead_code))]
fn wei_increment(amount: U256) -> u64 {
    if amount > U256::from(u64::MAX) {
        u64::MAX
    } else {
        amount.low_u64()
    }
}

/// Record a batch accepted
#[cfg(feature = "metrics")]
pub fn record_batch_accepted() {
    BATCHES_ACCEPTED.inc();
}

/// Record a submission rejected with reason
#[cfg(feature = "metrics")]
pub fn record_batch_rejected(reason: &str) {
    BATCHES_REJECTED.with_label_values(&[reason]).inc();
}

/// Record a refund payout
#[cfg(feature = "metrics")]
pub fn record_refund_paid(amount: U256) {
    REFUND_PAID_WEI.inc_by(wei_increment(amount));
}

/// Record a refund denied with reason
#[cfg(feature = "metrics")]
pub fn record_refund_denied(reason: &str) {
    REFUNDS_DENIED.with_label_values(&[reason]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_batch_accepted() {}

#[cfg(not(feature = "metrics"))]
pub fn record_batch_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_refund_paid(_amount: U256) {}

#[cfg(not(feature = "metrics"))]
pub fn record_refund_denied(_reason: &str) {}
