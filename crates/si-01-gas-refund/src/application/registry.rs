//! Refund Registry
//!
//! Maps refunder addresses to the policy deployed there, so a submission can
//! name its refund target by address.

use crate::domain::budget::GasRefundBudget;
use crate::domain::errors::{BudgetError, RefundDenied};
use crate::domain::ledger::BudgetLedger;
use crate::domain::optimized::GasRefundOptimized;
use crate::domain::value_objects::{Disbursement, RefundClaim};
use crate::ports::inbound::RefundPolicy;
use crate::ports::outbound::RefundTransfer;
use shared_types::entities::Address;
use std::collections::HashMap;
use tracing::debug;

/// A policy instance registered at some address.
#[derive(Debug, Clone)]
pub enum RefundPolicyKind {
    Budget(GasRefundBudget),
    Optimized(GasRefundOptimized),
}

impl RefundPolicyKind {
    /// The coarse policy, or `Unsupported` for `operation`.
    pub fn as_budget_mut(
        &mut self,
        operation: &'static str,
    ) -> Result<&mut GasRefundBudget, BudgetError> {
        match self {
            Self::Budget(budget) => Ok(budget),
            Self::Optimized(_) => Err(BudgetError::Unsupported {
                operation,
                policy: "optimized",
            }),
        }
    }
}

impl From<GasRefundBudget> for RefundPolicyKind {
    fn from(policy: GasRefundBudget) -> Self {
        Self::Budget(policy)
    }
}

impl From<GasRefundOptimized> for RefundPolicyKind {
    fn from(policy: GasRefundOptimized) -> Self {
        Self::Optimized(policy)
    }
}

impl RefundPolicy for RefundPolicyKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Budget(p) => p.name(),
            Self::Optimized(p) => p.name(),
        }
    }

    fn ledger(&self) -> &BudgetLedger {
        match self {
            Self::Budget(p) => RefundPolicy::ledger(p),
            Self::Optimized(p) => RefundPolicy::ledger(p),
        }
    }

    fn ledger_mut(&mut self) -> &mut BudgetLedger {
        match self {
            Self::Budget(p) => RefundPolicy::ledger_mut(p),
            Self::Optimized(p) => RefundPolicy::ledger_mut(p),
        }
    }

    fn refund(
        &mut self,
        claim: &RefundClaim,
        transfer: &dyn RefundTransfer,
    ) -> Result<Disbursement, RefundDenied> {
        match self {
            Self::Budget(p) => RefundPolicy::refund(p, claim, transfer),
            Self::Optimized(p) => RefundPolicy::refund(p, claim, transfer),
        }
    }
}

/// All refund policies known to the sequencer.
#[derive(Debug, Clone, Default)]
pub struct RefundRegistry {
    policies: HashMap<Address, RefundPolicyKind>,
}

impl RefundRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `policy` at `address`, returning whatever was there before.
    pub fn register(
        &mut self,
        address: Address,
        policy: impl Into<RefundPolicyKind>,
    ) -> Option<RefundPolicyKind> {
        let policy = policy.into();
        debug!(refunder = ?address, policy = policy.name(), "Refund policy registered");
        self.policies.insert(address, policy)
    }

    pub fn get(&self, address: &Address) -> Option<&RefundPolicyKind> {
        self.policies.get(address)
    }

    pub fn get_mut(&mut self, address: &Address) -> Option<&mut RefundPolicyKind> {
        self.policies.get_mut(address)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Route `claim` to the policy at `target`.
    pub fn refund(
        &mut self,
        target: Address,
        claim: &RefundClaim,
        transfer: &dyn RefundTransfer,
    ) -> Result<Disbursement, RefundDenied> {
        let policy = self
            .policies
            .get_mut(&target)
            .ok_or(RefundDenied::UnknownRefundTarget { target })?;
        policy.refund(claim, transfer)
    }
}
