//! Configuration for the Sequencer Inbox Subsystem

use crate::domain::errors::InboxConfigError;
use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, BlockNumber, TimeBounds, Timestamp};

/// Largest batch payload accepted, in bytes.
pub const DEFAULT_MAX_DATA_SIZE: usize = 117_964;

/// How far a batch's execution window may reach around the current block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxTimeVariation {
    /// Blocks a delayed message must age before it can be force-included
    pub delay_blocks: u64,
    /// Blocks into the future a batch may claim
    pub future_blocks: u64,
    /// Seconds a delayed message must age before it can be force-included
    pub delay_seconds: u64,
    /// Seconds into the future a batch may claim
    pub future_seconds: u64,
}

impl Default for MaxTimeVariation {
    fn default() -> Self {
        Self {
            delay_blocks: 7_200,
            future_blocks: 10,
            delay_seconds: 86_400,
            future_seconds: 3_000,
        }
    }
}

impl MaxTimeVariation {
    /// Execution window for a batch accepted at `block_number` / `timestamp`.
    pub fn bounds_at(&self, block_number: BlockNumber, timestamp: Timestamp) -> TimeBounds {
        TimeBounds {
            min_timestamp: timestamp.saturating_sub(self.delay_seconds),
            max_timestamp: timestamp.saturating_add(self.future_seconds),
            min_block_number: block_number.saturating_sub(self.delay_blocks),
            max_block_number: block_number.saturating_add(self.future_blocks),
        }
    }

    /// Whether a delayed message seen at `msg_block` / `msg_time` has aged
    /// past both delay bounds at `now_block` / `now_time`.
    pub fn delay_elapsed(
        &self,
        msg_block: BlockNumber,
        msg_time: Timestamp,
        now_block: BlockNumber,
        now_time: Timestamp,
    ) -> bool {
        msg_block.saturating_add(self.delay_blocks) < now_block
            && msg_time.saturating_add(self.delay_seconds) < now_time
    }
}

/// Inbox configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxConfig {
    /// Address of this inbox, used as the spender identity for refunds
    pub inbox_address: Address,
    /// Maximum encoded batch payload in bytes
    pub max_data_size: usize,
    pub max_time_variation: MaxTimeVariation,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            inbox_address: Address::repeat_byte(0x51),
            max_data_size: DEFAULT_MAX_DATA_SIZE,
            max_time_variation: MaxTimeVariation::default(),
        }
    }
}

impl InboxConfig {
    pub fn validate(&self) -> Result<(), InboxConfigError> {
        if self.inbox_address.is_zero() {
            return Err(InboxConfigError::ZeroInboxAddress);
        }
        if self.max_data_size == 0 {
            return Err(InboxConfigError::ZeroMaxDataSize);
        }
        Ok(())
    }
}
