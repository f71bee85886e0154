//! Coarse refund policy.
//!
//! Any allow-listed contract may request a refund for any allow-listed
//! refundee. There is no per-call or per-epoch limit: a busy caller can drain
//! the whole budget, so this policy is meant for small trusted spender sets.

use super::errors::RefundDenied;
use super::ledger::BudgetLedger;
use super::value_objects::{AllowList, Disbursement, RefundClaim};
use crate::ports::inbound::RefundPolicy;
use crate::ports::outbound::RefundTransfer;
use primitive_types::U256;
use shared_types::entities::Address;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct GasRefundBudget {
    ledger: BudgetLedger,
    allowed_contracts: HashSet<Address>,
    allowed_refundees: HashSet<Address>,
}

impl GasRefundBudget {
    pub fn new(operator: Address) -> Self {
        Self::with_ledger(BudgetLedger::new(operator))
    }

    pub fn with_ledger(ledger: BudgetLedger) -> Self {
        Self {
            ledger,
            allowed_contracts: HashSet::new(),
            allowed_refundees: HashSet::new(),
        }
    }

    pub fn ledger(&self) -> &BudgetLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut BudgetLedger {
        &mut self.ledger
    }

    pub fn is_contract_allowed(&self, contract: &Address) -> bool {
        self.allowed_contracts.contains(contract)
    }

    pub fn is_refundee_allowed(&self, refundee: &Address) -> bool {
        self.allowed_refundees.contains(refundee)
    }

    /// Add contracts. Returns how many were not already present.
    pub fn allow_contracts(&mut self, contracts: &[Address]) -> usize {
        self.update(AllowList::Contracts, contracts, true)
    }

    /// Add refundees. Returns how many were not already present.
    pub fn allow_refundees(&mut self, refundees: &[Address]) -> usize {
        self.update(AllowList::Refundees, refundees, true)
    }

    /// Remove contracts. Returns how many were present.
    pub fn disallow_contracts(&mut self, contracts: &[Address]) -> usize {
        self.update(AllowList::Contracts, contracts, false)
    }

    /// Remove refundees. Returns how many were present.
    pub fn disallow_refundees(&mut self, refundees: &[Address]) -> usize {
        self.update(AllowList::Refundees, refundees, false)
    }

    /// Add to or remove from one of the allow-lists.
    pub fn update(&mut self, list: AllowList, addresses: &[Address], allowed: bool) -> usize {
        let set = match list {
            AllowList::Contracts => &mut self.allowed_contracts,
            AllowList::Refundees => &mut self.allowed_refundees,
        };
        addresses
            .iter()
            .filter(|addr| {
                if allowed {
                    set.insert(**addr)
                } else {
                    set.remove(*addr)
                }
            })
            .count()
    }

    /// Pay `min(amount, balance)` to `recipient`.
    ///
    /// Both `spender` and `recipient` must be allow-listed; nothing is touched
    /// otherwise. A rejected transfer leaves the ledger unchanged.
    pub fn refund(
        &mut self,
        spender: Address,
        recipient: Address,
        amount: U256,
        transfer: &dyn RefundTransfer,
    ) -> Result<Disbursement, RefundDenied> {
        if !self.is_contract_allowed(&spender) {
            return Err(RefundDenied::ContractNotAllowed { contract: spender });
        }
        if !self.is_refundee_allowed(&recipient) {
            return Err(RefundDenied::RefundeeNotAllowed {
                refundee: recipient,
            });
        }
        if amount.is_zero() {
            return Err(RefundDenied::ZeroRefund);
        }

        let payable = self.ledger.payable(amount);
        if payable.is_zero() {
            return Err(RefundDenied::BudgetExhausted);
        }

        transfer
            .transfer(recipient, payable)
            .map_err(|e| RefundDenied::TransferRejected(e.to_string()))?;
        let paid = self.ledger.disburse(payable);

        Ok(Disbursement {
            amount: paid,
            nominal: amount,
        })
    }
}

impl RefundPolicy for GasRefundBudget {
    fn name(&self) -> &'static str {
        "budget"
    }

    fn ledger(&self) -> &BudgetLedger {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut BudgetLedger {
        &mut self.ledger
    }

    /// Pays the raw `gas_used * gas_price`; calldata and overhead are not counted.
    fn refund(
        &mut self,
        claim: &RefundClaim,
        transfer: &dyn RefundTransfer,
    ) -> Result<Disbursement, RefundDenied> {
        let amount = U256::from(claim.gas_used).saturating_mul(claim.gas_price);
        GasRefundBudget::refund(self, claim.spender, claim.recipient, amount, transfer)
    }
}
