//! Domain invariants for Gas Refund

use super::ledger::BudgetLedger;
use super::value_objects::{Disbursement, RateLimitState};
use primitive_types::U256;

/// INVARIANT-1: Epoch Ceiling
/// Cumulative payout within one epoch never exceeds the ceiling.
pub fn invariant_epoch_ceiling(state: &RateLimitState, ceiling: U256) -> bool {
    state.cumulative <= ceiling
}

/// INVARIANT-2: Payout Bounded By Balance
/// A disbursement never pays more than the balance held before it.
pub fn invariant_payout_bounded(balance_before: U256, paid: &Disbursement) -> bool {
    paid.amount <= balance_before
}

/// INVARIANT-3: Conservation
/// The ledger decreased by exactly the amount paid.
pub fn invariant_ledger_conserved(
    balance_before: U256,
    ledger_after: &BudgetLedger,
    paid: &Disbursement,
) -> bool {
    balance_before.checked_sub(paid.amount) == Some(ledger_after.balance())
}
