//! Keccak-256 helpers for the inbox accumulator chain.

use crate::entities::Hash;
use sha3::{Digest, Keccak256};

/// Keccak-256 of a single byte slice.
pub fn keccak256(data: &[u8]) -> Hash {
    Hash::from_slice(&Keccak256::digest(data))
}

/// Keccak-256 of the concatenation of `parts`, without allocating the joined buffer.
pub fn keccak256_concat(parts: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    Hash::from_slice(&hasher.finalize())
}
