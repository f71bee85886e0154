//! Manually driven host environment.

use crate::ports::outbound::HostEnvironment;
use parking_lot::RwLock;
use primitive_types::U256;
use shared_types::entities::{Address, BlockNumber, Gas, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HostState {
    block_number: BlockNumber,
    timestamp: Timestamp,
    tx_origin: Address,
    gas_price: U256,
    gas_used: Gas,
}

/// Host whose block, clock and gas readings are set explicitly.
#[derive(Debug)]
pub struct ManualHost {
    state: RwLock<HostState>,
}

impl ManualHost {
    pub fn new(block_number: BlockNumber, timestamp: Timestamp) -> Self {
        Self {
            state: RwLock::new(HostState {
                block_number,
                timestamp,
                tx_origin: Address::zero(),
                gas_price: U256::zero(),
                gas_used: 0,
            }),
        }
    }

    /// Move forward by `blocks` blocks and `seconds` seconds.
    pub fn advance(&self, blocks: u64, seconds: u64) {
        let mut state = self.state.write();
        state.block_number = state.block_number.saturating_add(blocks);
        state.timestamp = state.timestamp.saturating_add(seconds);
    }

    pub fn set_tx_origin(&self, origin: Address) {
        self.state.write().tx_origin = origin;
    }

    /// Gas readings reported for the next call.
    pub fn set_gas(&self, gas_used: Gas, gas_price: U256) {
        let mut state = self.state.write();
        state.gas_used = gas_used;
        state.gas_price = gas_price;
    }
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl HostEnvironment for ManualHost {
    fn block_number(&self) -> BlockNumber {
        self.state.read().block_number
    }

    fn timestamp(&self) -> Timestamp {
        self.state.read().timestamp
    }

    fn tx_origin(&self) -> Address {
        self.state.read().tx_origin
    }

    fn gas_price(&self) -> U256 {
        self.state.read().gas_price
    }

    fn gas_used(&self) -> Gas {
        self.state.read().gas_used
    }
}
