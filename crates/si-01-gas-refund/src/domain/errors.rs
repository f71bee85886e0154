//! Error types for Gas Refund

use primitive_types::U256;
use shared_types::entities::Address;
use thiserror::Error;

/// Reasons a refund paid nothing.
///
/// Never propagated past the sequencer: it is logged, published as an event
/// and then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefundDenied {
    /// The calling contract is not on the contract allow-list
    #[error("Contract {contract:?} is not allowed to request refunds")]
    ContractNotAllowed { contract: Address },

    /// The recipient is not on the refundee allow-list
    #[error("Refundee {refundee:?} is not allowed")]
    RefundeeNotAllowed { refundee: Address },

    /// The ledger has nothing left to pay
    #[error("Budget exhausted")]
    BudgetExhausted,

    /// The per-epoch payout ceiling is already reached
    #[error("Epoch ceiling reached: {cumulative} of {ceiling} paid")]
    EpochCeilingReached { cumulative: U256, ceiling: U256 },

    /// Computed cost is zero
    #[error("Refund amount is zero")]
    ZeroRefund,

    /// The payout transfer was refused
    #[error("Transfer rejected: {0}")]
    TransferRejected(String),

    /// No policy is registered at the refund target
    #[error("No refund policy registered at {target:?}")]
    UnknownRefundTarget { target: Address },
}

impl RefundDenied {
    /// Short label for metrics and event reasons.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ContractNotAllowed { .. } => "contract_not_allowed",
            Self::RefundeeNotAllowed { .. } => "refundee_not_allowed",
            Self::BudgetExhausted => "budget_exhausted",
            Self::EpochCeilingReached { .. } => "epoch_ceiling_reached",
            Self::ZeroRefund => "zero_refund",
            Self::TransferRejected(_) => "transfer_rejected",
            Self::UnknownRefundTarget { .. } => "unknown_refund_target",
        }
    }
}

/// Errors from budget administration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Caller is not the ledger operator
    #[error("Unauthorized: {caller:?} is not the operator")]
    Unauthorized { caller: Address },

    /// Withdrawal exceeds the balance
    #[error("Insufficient balance: requested {requested}, available {balance}")]
    InsufficientBalance { requested: U256, balance: U256 },

    /// Funding would overflow the balance
    #[error("Balance overflow")]
    Overflow,

    /// Outgoing transfer failed
    #[error("Transfer failed: {0}")]
    TransferFailed(String),

    /// No policy is registered at this address
    #[error("Unknown refunder {0:?}")]
    UnknownRefunder(Address),

    /// The policy does not support this operation
    #[error("Operation '{operation}' not supported by {policy} policy")]
    Unsupported {
        operation: &'static str,
        policy: &'static str,
    },
}

/// Result of a budget administration operation.
pub type BudgetResult<T> = Result<T, BudgetError>;

/// Invalid refund configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefundConfigError {
    #[error("Price floor {floor} exceeds price ceiling {ceiling}")]
    PriceBoundsInverted { floor: U256, ceiling: U256 },

    #[error("Epoch length must be non-zero")]
    ZeroEpochLength,
}
