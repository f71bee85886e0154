//! Outbound Ports (Driven Ports / SPI)

use primitive_types::U256;
use shared_types::entities::Address;
use shared_types::errors::PortError;

/// Moves native value out of a refund budget.
///
/// Called only after the policy has decided to pay; the ledger is debited
/// only if this succeeds.
pub trait RefundTransfer: Send + Sync {
    fn transfer(&self, recipient: Address, amount: U256) -> Result<(), PortError>;
}
