//! IPC Payloads for Gas Refund administration

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::entities::Address;

// ============================================================
// INCOMING REQUESTS
// ============================================================

/// Operation on one refund policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetAdminCommand {
    AllowContracts(Vec<Address>),
    DisallowContracts(Vec<Address>),
    AllowRefundees(Vec<Address>),
    DisallowRefundees(Vec<Address>),
    /// External top-up
    Fund { amount: U256 },
    /// Operator withdrawal to the caller
    Withdraw { amount: U256 },
}

impl BudgetAdminCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AllowContracts(_) => "allow_contracts",
            Self::DisallowContracts(_) => "disallow_contracts",
            Self::AllowRefundees(_) => "allow_refundees",
            Self::DisallowRefundees(_) => "disallow_refundees",
            Self::Fund { .. } => "fund",
            Self::Withdraw { .. } => "withdraw",
        }
    }

    /// Whether only the ledger operator may issue this command.
    pub fn requires_operator(&self) -> bool {
        !matches!(self, Self::Fund { .. })
    }
}

/// Request to administer the policy at `refunder`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetAdminRequest {
    /// Correlation ID for response tracking
    pub correlation_id: [u8; 16],
    /// Address of the refund policy
    pub refunder: Address,
    /// Account issuing the command
    pub caller: Address,
    pub command: BudgetAdminCommand,
}

// ============================================================
// OUTGOING RESPONSES
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetAdminResponse {
    /// Correlation ID from request
    pub correlation_id: [u8; 16],
    /// Whether the command was applied
    pub success: bool,
    /// Ledger balance after the command
    pub balance: Option<U256>,
    /// Error message (if failed)
    pub error: Option<String>,
}

impl BudgetAdminResponse {
    pub fn ok(correlation_id: [u8; 16], balance: U256) -> Self {
        Self {
            correlation_id,
            success: true,
            balance: Some(balance),
            error: None,
        }
    }

    pub fn err(correlation_id: [u8; 16], error: impl ToString) -> Self {
        Self {
            correlation_id,
            success: false,
            balance: None,
            error: Some(error.to_string()),
        }
    }
}
