//! Value objects for Gas Refund

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, Gas, Timestamp};

/// The cost of one submission, as reported by the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundClaim {
    /// Contract requesting the refund (the sequencer inbox)
    pub spender: Address,
    /// Account to reimburse (the batch poster)
    pub recipient: Address,
    /// Gas consumed by the submission
    pub gas_used: Gas,
    /// Price paid per unit of gas
    pub gas_price: U256,
    /// Length of the submitted calldata in bytes
    pub calldata_len: u64,
    /// Settlement-layer time of the submission
    pub timestamp: Timestamp,
}

/// What a successful refund actually paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disbursement {
    /// Amount transferred to the recipient
    pub amount: U256,
    /// Amount computed before clamping to ceilings and balance
    pub nominal: U256,
}

impl Disbursement {
    /// Whether clamping reduced the payout.
    pub fn is_partial(&self) -> bool {
        self.amount < self.nominal
    }
}

/// Per-epoch payout tracking of the optimized policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RateLimitState {
    /// Start of the current epoch
    pub epoch_start: Timestamp,
    /// Paid out so far in the current epoch
    pub cumulative: U256,
}

impl RateLimitState {
    pub fn new(epoch_start: Timestamp) -> Self {
        Self {
            epoch_start,
            cumulative: U256::zero(),
        }
    }

    /// Roll into the next epoch if `now` has crossed the boundary.
    ///
    /// Advances by exactly one `epoch_length`, never catching up to `now`.
    /// After `n` idle epochs the next `n` calls each reset the cumulative, so
    /// up to `n` times the ceiling can be paid within one real epoch.
    /// Returns `true` when a reset happened.
    pub fn roll(&mut self, now: Timestamp, epoch_length: u64) -> bool {
        let boundary = self.epoch_start.saturating_add(epoch_length);
        if now < boundary {
            return false;
        }
        self.epoch_start = boundary;
        self.cumulative = U256::zero();
        true
    }

    /// Remaining allowance under `ceiling`.
    pub fn remaining(&self, ceiling: U256) -> U256 {
        ceiling.saturating_sub(self.cumulative)
    }
}

/// Which allow-list of the coarse policy an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllowList {
    Contracts,
    Refundees,
}

impl AllowList {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contracts => "contracts",
            Self::Refundees => "refundees",
        }
    }
}
