//! IPC Handler for Gas Refund administration
//!
//! ## Security Boundaries
//!
//! - MUST reject allow-list changes and withdrawals from anyone but the
//!   ledger operator
//! - MUST leave the ledger untouched when a withdrawal transfer fails

use crate::application::registry::{RefundPolicyKind, RefundRegistry};
use crate::domain::errors::{BudgetError, BudgetResult, RefundDenied};
use crate::domain::value_objects::{AllowList, Disbursement};
use crate::ipc::payloads::{BudgetAdminCommand, BudgetAdminRequest, BudgetAdminResponse};
use crate::ports::inbound::RefundPolicy;
use crate::ports::outbound::RefundTransfer;
use crate::SUBSYSTEM;
use inbox_telemetry::log_event;
use primitive_types::U256;
use shared_bus::InboxEvent;
use shared_types::entities::Address;
use std::sync::Arc;

/// Applies budget administration commands to a [`RefundRegistry`].
///
/// The registry is owned by the sequencer; this handler only borrows it for
/// the duration of one command.
pub struct BudgetAdminHandler {
    transfer: Arc<dyn RefundTransfer>,
}

impl BudgetAdminHandler {
    pub fn new(transfer: Arc<dyn RefundTransfer>) -> Self {
        Self { transfer }
    }

    /// Handle one request. Returns the response and the events to publish.
    pub fn handle(
        &self,
        registry: &mut RefundRegistry,
        request: BudgetAdminRequest,
    ) -> (BudgetAdminResponse, Vec<InboxEvent>) {
        let correlation_id = request.correlation_id;
        let command = request.command.name();

        match self.apply(registry, &request) {
            Ok((balance, events)) => {
                log_event!(
                    info,
                    SUBSYSTEM,
                    "Budget command applied",
                    command = command,
                    refunder = ?request.refunder,
                    balance = %balance
                );
                (BudgetAdminResponse::ok(correlation_id, balance), events)
            }
            Err(e) => {
                log_event!(
                    warn,
                    SUBSYSTEM,
                    "Budget command rejected",
                    command = command,
                    refunder = ?request.refunder,
                    caller = ?request.caller,
                    error = %e
                );
                (BudgetAdminResponse::err(correlation_id, e), Vec::new())
            }
        }
    }

    fn apply(
        &self,
        registry: &mut RefundRegistry,
        request: &BudgetAdminRequest,
    ) -> BudgetResult<(U256, Vec<InboxEvent>)> {
        let refunder = request.refunder;
        let caller = request.caller;
        let policy = registry
            .get_mut(&refunder)
            .ok_or(BudgetError::UnknownRefunder(refunder))?;

        // Security: operator-only commands
        if request.command.requires_operator() && !policy.ledger().is_operator(caller) {
            return Err(BudgetError::Unauthorized { caller });
        }

        let event = match &request.command {
            BudgetAdminCommand::AllowContracts(addrs) => {
                update_list(policy, refunder, AllowList::Contracts, addrs, true)?
            }
            BudgetAdminCommand::DisallowContracts(addrs) => {
                update_list(policy, refunder, AllowList::Contracts, addrs, false)?
            }
            BudgetAdminCommand::AllowRefundees(addrs) => {
                update_list(policy, refunder, AllowList::Refundees, addrs, true)?
            }
            BudgetAdminCommand::DisallowRefundees(addrs) => {
                update_list(policy, refunder, AllowList::Refundees, addrs, false)?
            }
            BudgetAdminCommand::Fund { amount } => {
                let balance = policy.fund(*amount)?;
                InboxEvent::BudgetFunded {
                    refunder,
                    from: caller,
                    amount: *amount,
                    balance,
                }
            }
            BudgetAdminCommand::Withdraw { amount } => {
                let balance = policy.withdraw(caller, *amount, self.transfer.as_ref())?;
                InboxEvent::BudgetWithdrawn {
                    refunder,
                    operator: caller,
                    amount: *amount,
                    balance,
                }
            }
        };

        Ok((policy.ledger().balance(), vec![event]))
    }
}

fn update_list(
    policy: &mut RefundPolicyKind,
    refunder: Address,
    list: AllowList,
    addresses: &[Address],
    allowed: bool,
) -> BudgetResult<InboxEvent> {
    let operation = match (list, allowed) {
        (AllowList::Contracts, true) => "allow_contracts",
        (AllowList::Contracts, false) => "disallow_contracts",
        (AllowList::Refundees, true) => "allow_refundees",
        (AllowList::Refundees, false) => "disallow_refundees",
    };
    let changed = policy
        .as_budget_mut(operation)?
        .update(list, addresses, allowed);
    tracing::debug!(list = list.as_str(), changed, "Allow-list updated");

    Ok(InboxEvent::AllowlistUpdated {
        refunder,
        list: list.as_str().to_string(),
        addresses: addresses.to_vec(),
        allowed,
    })
}

/// Turn the outcome of a refund attempt into the event to publish.
pub fn refund_event(
    refunder: Address,
    recipient: Address,
    outcome: &Result<Disbursement, RefundDenied>,
) -> InboxEvent {
    match outcome {
        Ok(paid) => InboxEvent::RefundPaid {
            refunder,
            recipient,
            amount: paid.amount,
            nominal: paid.nominal,
        },
        Err(denied) => InboxEvent::RefundDenied {
            refunder,
            recipient,
            reason: denied.to_string(),
        },
    }
}
