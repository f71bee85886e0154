//! Inbound Ports (Driving Ports / API)

use crate::domain::errors::{BudgetError, RefundDenied};
use crate::domain::ledger::BudgetLedger;
use crate::domain::value_objects::{Disbursement, RefundClaim};
use crate::ports::outbound::RefundTransfer;
use primitive_types::U256;
use shared_types::entities::Address;

/// A reimbursement policy backed by a [`BudgetLedger`].
pub trait RefundPolicy {
    /// Short policy name for logs and errors.
    fn name(&self) -> &'static str;

    fn ledger(&self) -> &BudgetLedger;

    fn ledger_mut(&mut self) -> &mut BudgetLedger;

    /// Reimburse the cost described by `claim`.
    ///
    /// Either pays something and debits the ledger, or returns a
    /// [`RefundDenied`] with the ledger untouched.
    fn refund(
        &mut self,
        claim: &RefundClaim,
        transfer: &dyn RefundTransfer,
    ) -> Result<Disbursement, RefundDenied>;

    /// Unconditional top-up. Returns the new balance.
    fn fund(&mut self, amount: U256) -> Result<U256, BudgetError> {
        self.ledger_mut().fund(amount)
    }

    /// Operator withdrawal through `transfer`. Returns the new balance.
    fn withdraw(
        &mut self,
        caller: Address,
        amount: U256,
        transfer: &dyn RefundTransfer,
    ) -> Result<U256, BudgetError> {
        self.ledger().ensure_withdrawable(caller, amount)?;
        transfer
            .transfer(caller, amount)
            .map_err(|e| BudgetError::TransferFailed(e.to_string()))?;
        self.ledger_mut().withdraw(caller, amount)
    }
}
