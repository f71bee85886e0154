//! In-memory payout transport.
//!
//! Records every transfer instead of moving value, and can be told to refuse
//! specific recipients (a recipient whose fallback reverts, for example).

use crate::ports::outbound::RefundTransfer;
use parking_lot::Mutex;
use primitive_types::U256;
use shared_types::entities::Address;
use shared_types::errors::PortError;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct RecordingTransfer {
    payouts: Mutex<Vec<(Address, U256)>>,
    refused: Mutex<HashSet<Address>>,
}

impl RecordingTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse all future transfers to `recipient`.
    pub fn refuse(&self, recipient: Address) {
        self.refused.lock().insert(recipient);
    }

    /// Accept transfers to `recipient` again.
    pub fn accept(&self, recipient: Address) {
        self.refused.lock().remove(&recipient);
    }

    pub fn payouts(&self) -> Vec<(Address, U256)> {
        self.payouts.lock().clone()
    }

    pub fn total_to(&self, recipient: Address) -> U256 {
        self.payouts
            .lock()
            .iter()
            .filter(|(to, _)| *to == recipient)
            .fold(U256::zero(), |acc, (_, amount)| acc.saturating_add(*amount))
    }

    pub fn total(&self) -> U256 {
        self.payouts
            .lock()
            .iter()
            .fold(U256::zero(), |acc, (_, amount)| acc.saturating_add(*amount))
    }
}

impl RefundTransfer for RecordingTransfer {
    fn transfer(&self, recipient: Address, amount: U256) -> Result<(), PortError> {
        if self.refused.lock().contains(&recipient) {
            return Err(PortError::TransferRejected {
                recipient,
                reason: "recipient refused payment".to_string(),
            });
        }
        self.payouts.lock().push((recipient, amount));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_payouts() {
        let transfer = RecordingTransfer::new();
        let a = Address::repeat_byte(1);
        let b = Address::repeat_byte(2);

        transfer.transfer(a, U256::from(5u64)).unwrap();
        transfer.transfer(b, U256::from(7u64)).unwrap();
        transfer.transfer(a, U256::from(1u64)).unwrap();

        assert_eq!(transfer.total_to(a), U256::from(6u64));
        assert_eq!(transfer.total(), U256::from(13u64));
        assert_eq!(transfer.payouts().len(), 3);
    }

    #[test]
    fn test_refused_recipient() {
        let transfer = RecordingTransfer::new();
        let a = Address::repeat_byte(1);

        transfer.refuse(a);
        assert!(transfer.transfer(a, U256::one()).is_err());
        assert_eq!(transfer.total(), U256::zero());

        transfer.accept(a);
        assert!(transfer.transfer(a, U256::one()).is_ok());
    }
}
