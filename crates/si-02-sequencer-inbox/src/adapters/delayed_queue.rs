//! In-memory delayed message queue.

use crate::ports::outbound::{DelayedMessage, DelayedQueueView};
use parking_lot::RwLock;
use shared_types::entities::{BlockNumber, Hash, Timestamp};
use shared_types::errors::PortError;
use shared_types::hashing::keccak256_concat;

/// Delayed queue with a keccak accumulator over message hashes.
#[derive(Debug, Default)]
pub struct InMemoryDelayedQueue {
    messages: RwLock<Vec<DelayedMessage>>,
}

impl InMemoryDelayedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a message; returns its index.
    pub fn push(&self, block_number: BlockNumber, timestamp: Timestamp, message_hash: Hash) -> u64 {
        let mut messages = self.messages.write();
        let prev = messages.last().map(|m| m.accumulator).unwrap_or_else(Hash::zero);
        messages.push(DelayedMessage {
            block_number,
            timestamp,
            accumulator: keccak256_concat(&[prev.as_bytes(), message_hash.as_bytes()]),
        });
        messages.len() as u64 - 1
    }

    /// Drop every message at or after `count`.
    pub fn truncate(&self, count: u64) {
        let len = usize::try_from(count).unwrap_or(usize::MAX);
        self.messages.write().truncate(len);
    }
}

impl DelayedQueueView for InMemoryDelayedQueue {
    fn delayed_message_count(&self) -> u64 {
        self.messages.read().len() as u64
    }

    fn delayed_message(&self, index: u64) -> Result<DelayedMessage, PortError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.messages.read().get(i).copied())
            .ok_or(PortError::DelayedMessageNotFound { index })
    }
}
