//! Budget ledger backing both refund policies.

use super::errors::{BudgetError, BudgetResult};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::entities::Address;

/// Reimbursable balance of one refund policy.
///
/// Funded by anyone, drained only by refund payouts and by operator
/// withdrawals. A payout is always clamped to the balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLedger {
    operator: Address,
    balance: U256,
}

impl BudgetLedger {
    pub fn new(operator: Address) -> Self {
        Self {
            operator,
            balance: U256::zero(),
        }
    }

    pub fn with_balance(operator: Address, balance: U256) -> Self {
        Self { operator, balance }
    }

    pub fn operator(&self) -> Address {
        self.operator
    }

    pub fn balance(&self) -> U256 {
        self.balance
    }

    pub fn is_operator(&self, caller: Address) -> bool {
        caller == self.operator
    }

    /// Top up the balance. Returns the new balance.
    pub fn fund(&mut self, amount: U256) -> BudgetResult<U256> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BudgetError::Overflow)?;
        Ok(self.balance)
    }

    /// Check that `caller` may withdraw `amount` without touching state.
    pub fn ensure_withdrawable(&self, caller: Address, amount: U256) -> BudgetResult<()> {
        if !self.is_operator(caller) {
            return Err(BudgetError::Unauthorized { caller });
        }
        if amount > self.balance {
            return Err(BudgetError::InsufficientBalance {
                requested: amount,
                balance: self.balance,
            });
        }
        Ok(())
    }

    /// Operator withdrawal. Returns the new balance.
    pub fn withdraw(&mut self, caller: Address, amount: U256) -> BudgetResult<U256> {
        self.ensure_withdrawable(caller, amount)?;
        self.balance -= amount;
        Ok(self.balance)
    }

    /// What a payout of `requested` would actually pay.
    pub fn payable(&self, requested: U256) -> U256 {
        requested.min(self.balance)
    }

    /// Pay out up to `requested`, clamped to the balance. Returns the amount paid.
    pub fn disburse(&mut self, requested: U256) -> U256 {
        let paid = self.payable(requested);
        self.balance -= paid;
        paid
    }
}
