//! # Core Domain Entities
//!
//! Defines the primitive aliases and the batch metadata carried in events.
//!
//! ## Clusters
//!
//! - **Primitives**: `Address`, `Hash`, `U256`, `BlockNumber`, `Timestamp`
//! - **Batch Metadata**: `TimeBounds`, `BatchDataLocation`

use serde::{Deserialize, Serialize};

// Re-export the fixed-width primitives for use across all subsystems
pub use primitive_types::{H160, H256, U256};

// =============================================================================
// CLUSTER A: PRIMITIVES
// =============================================================================

/// A 20-byte settlement-layer account address.
pub type Address = H160;

/// A 32-byte keccak-256 digest.
pub type Hash = H256;

/// Settlement-layer block number.
pub type BlockNumber = u64;

/// Settlement-layer timestamp in seconds.
pub type Timestamp = u64;

/// Amount of gas consumed or reimbursed.
pub type Gas = u64;

/// The zero address, used as "no refund target".
pub const ZERO_ADDRESS: Address = H160::zero();

// =============================================================================
// CLUSTER B: BATCH METADATA
// =============================================================================

/// Length of the encoded batch header in bytes.
pub const BATCH_HEADER_LEN: usize = 40;

/// Block and timestamp window in which a batch's messages must be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeBounds {
    /// Earliest timestamp the batch may claim.
    pub min_timestamp: Timestamp,
    /// Latest timestamp the batch may claim.
    pub max_timestamp: Timestamp,
    /// Earliest block number the batch may claim.
    pub min_block_number: BlockNumber,
    /// Latest block number the batch may claim.
    pub max_block_number: BlockNumber,
}

impl TimeBounds {
    /// Encodes the 40-byte batch header.
    ///
    /// Layout (big-endian u64 each):
    /// `min_timestamp ‖ max_timestamp ‖ min_block ‖ max_block ‖ after_delayed_read`
    pub fn encode_header(&self, after_delayed_messages_read: u64) -> [u8; BATCH_HEADER_LEN] {
        let mut header = [0u8; BATCH_HEADER_LEN];
        header[0..8].copy_from_slice(&self.min_timestamp.to_be_bytes());
        header[8..16].copy_from_slice(&self.max_timestamp.to_be_bytes());
        header[16..24].copy_from_slice(&self.min_block_number.to_be_bytes());
        header[24..32].copy_from_slice(&self.max_block_number.to_be_bytes());
        header[32..40].copy_from_slice(&after_delayed_messages_read.to_be_bytes());
        header
    }
}

/// Where the data of a sequenced batch can be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchDataLocation {
    /// Data was posted directly in the poster's transaction input.
    TxInput,
    /// Data was relayed by a contract and published in a separate event.
    SeparateBatchEvent,
    /// Batch carries no data (force-included delayed messages).
    NoData,
    /// Data lives in an external data-availability layer; only a pointer is stored.
    DataAvailability,
}
