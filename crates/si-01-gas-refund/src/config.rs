//! Configuration for the Gas Refund Subsystem

use crate::domain::errors::RefundConfigError;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, Gas};

/// One gwei in wei.
const GWEI: u64 = 1_000_000_000;

/// Construction-time parameters of [`GasRefundOptimized`](crate::GasRefundOptimized).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedRefundConfig {
    /// The only contract allowed to request refunds
    pub allowed_contract: Address,
    /// The only account that may be refunded
    pub allowed_refundee: Address,
    /// Fixed per-call overhead added to the reported gas
    pub extra_gas: Gas,
    /// Gas charged per calldata byte
    pub calldata_cost: Gas,
    /// Upper bound on gas refunded per call
    pub gas_ceiling: Gas,
    /// Lower clamp for the gas price
    pub price_floor: U256,
    /// Upper clamp for the gas price
    pub price_ceiling: U256,
    /// Epoch length in settlement-layer seconds
    pub epoch_length: u64,
    /// Maximum total payout per epoch
    pub epoch_ceiling: U256,
}

impl Default for OptimizedRefundConfig {
    fn default() -> Self {
        Self {
            allowed_contract: Address::zero(),
            allowed_refundee: Address::zero(),
            extra_gas: 76_400,
            calldata_cost: 16,
            gas_ceiling: 2_000_000,
            price_floor: U256::zero(),
            price_ceiling: U256::from(120 * GWEI),
            epoch_length: 86_400,
            // 1 ether
            epoch_ceiling: U256::from(GWEI) * U256::from(GWEI),
        }
    }
}

impl OptimizedRefundConfig {
    pub fn new(allowed_contract: Address, allowed_refundee: Address) -> Self {
        Self {
            allowed_contract,
            allowed_refundee,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), RefundConfigError> {
        if self.price_floor > self.price_ceiling {
            return Err(RefundConfigError::PriceBoundsInverted {
                floor: self.price_floor,
                ceiling: self.price_ceiling,
            });
        }
        if self.epoch_length == 0 {
            return Err(RefundConfigError::ZeroEpochLength);
        }
        Ok(())
    }
}
