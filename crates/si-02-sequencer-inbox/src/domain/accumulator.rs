//! Inbox accumulator chain.
//!
//! ```text
//! header     = min_ts ‖ max_ts ‖ min_block ‖ max_block ‖ after_delayed_read   (40 bytes)
//! data_hash  = keccak(header ‖ data)
//! after_acc  = keccak(before_acc ‖ data_hash ‖ delayed_acc)
//! ```
//!
//! `delayed_acc` is the delayed queue accumulator of the last delayed message
//! the batch includes, or zero when it includes none.

use shared_types::entities::{Hash, TimeBounds};
use shared_types::hashing::keccak256_concat;

pub fn batch_data_hash(
    time_bounds: &TimeBounds,
    after_delayed_messages_read: u64,
    data: &[u8],
) -> Hash {
    let header = time_bounds.encode_header(after_delayed_messages_read);
    keccak256_concat(&[&header, data])
}

pub fn next_accumulator(before_acc: Hash, data_hash: Hash, delayed_acc: Hash) -> Hash {
    keccak256_concat(&[
        before_acc.as_bytes(),
        data_hash.as_bytes(),
        delayed_acc.as_bytes(),
    ])
}
