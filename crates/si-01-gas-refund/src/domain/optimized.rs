//! Rate-limited refund policy.
//!
//! One contract, one refundee, fixed at construction. Each payout is
//!
//! ```text
//! effective_gas   = min(gas_used + extra_gas + calldata_len * calldata_cost, gas_ceiling)
//! effective_price = clamp(gas_price, price_floor, price_ceiling)
//! nominal         = effective_gas * effective_price
//! payable         = min(nominal, epoch_ceiling - paid_this_epoch, balance)
//! ```
//!
//! The epoch boundary moves forward by exactly one `epoch_length` on the
//! first call at or after it, so boundaries stay evenly spaced from genesis.

use super::errors::{RefundConfigError, RefundDenied};
use super::ledger::BudgetLedger;
use super::value_objects::{Disbursement, RateLimitState, RefundClaim};
use crate::config::OptimizedRefundConfig;
use crate::ports::inbound::RefundPolicy;
use crate::ports::outbound::RefundTransfer;
use primitive_types::U256;
use shared_types::entities::{Gas, Timestamp};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct GasRefundOptimized {
    config: OptimizedRefundConfig,
    ledger: BudgetLedger,
    rate_limit: RateLimitState,
}

impl GasRefundOptimized {
    /// Create a policy whose first epoch starts at `genesis`.
    pub fn new(
        config: OptimizedRefundConfig,
        ledger: BudgetLedger,
        genesis: Timestamp,
    ) -> Result<Self, RefundConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ledger,
            rate_limit: RateLimitState::new(genesis),
        })
    }

    pub fn config(&self) -> &OptimizedRefundConfig {
        &self.config
    }

    pub fn rate_limit(&self) -> &RateLimitState {
        &self.rate_limit
    }

    pub fn effective_gas(&self, gas_used: Gas, calldata_len: u64) -> Gas {
        gas_used
            .saturating_add(self.config.extra_gas)
            .saturating_add(calldata_len.saturating_mul(self.config.calldata_cost))
            .min(self.config.gas_ceiling)
    }

    pub fn effective_price(&self, gas_price: U256) -> U256 {
        gas_price
            .max(self.config.price_floor)
            .min(self.config.price_ceiling)
    }

    /// Cost of `claim` before epoch and balance clamping.
    pub fn nominal(&self, claim: &RefundClaim) -> U256 {
        U256::from(self.effective_gas(claim.gas_used, claim.calldata_len))
            .saturating_mul(self.effective_price(claim.gas_price))
    }

    /// Reimburse `claim.recipient` for the submission described by `claim`.
    pub fn refund(
        &mut self,
        claim: &RefundClaim,
        transfer: &dyn RefundTransfer,
    ) -> Result<Disbursement, RefundDenied> {
        if claim.spender != self.config.allowed_contract {
            return Err(RefundDenied::ContractNotAllowed {
                contract: claim.spender,
            });
        }
        if claim.recipient != self.config.allowed_refundee {
            return Err(RefundDenied::RefundeeNotAllowed {
                refundee: claim.recipient,
            });
        }

        if self
            .rate_limit
            .roll(claim.timestamp, self.config.epoch_length)
        {
            debug!(
                epoch_start = self.rate_limit.epoch_start,
                "Refund epoch rolled over"
            );
        }

        let nominal = self.nominal(claim);
        if nominal.is_zero() {
            return Err(RefundDenied::ZeroRefund);
        }

        let remaining = self.rate_limit.remaining(self.config.epoch_ceiling);
        if remaining.is_zero() {
            return Err(RefundDenied::EpochCeilingReached {
                cumulative: self.rate_limit.cumulative,
                ceiling: self.config.epoch_ceiling,
            });
        }

        let payable = self.ledger.payable(nominal.min(remaining));
        if payable.is_zero() {
            return Err(RefundDenied::BudgetExhausted);
        }

        transfer
            .transfer(claim.recipient, payable)
            .map_err(|e| RefundDenied::TransferRejected(e.to_string()))?;

        let paid = self.ledger.disburse(payable);
        self.rate_limit.cumulative = self.rate_limit.cumulative.saturating_add(paid);

        Ok(Disbursement {
            amount: paid,
            nominal,
        })
    }
}

impl RefundPolicy for GasRefundOptimized {
    fn name(&self) -> &'static str {
        "optimized"
    }

    fn ledger(&self) -> &BudgetLedger {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut BudgetLedger {
        &mut self.ledger
    }

    fn refund(
        &mut self,
        claim: &RefundClaim,
        transfer: &dyn RefundTransfer,
    ) -> Result<Disbursement, RefundDenied> {
        GasRefundOptimized::refund(self, claim, transfer)
    }
}
