//! # Event Publisher
//!
//! Broadcast side of the bus. Every subscriber receives every event in
//! publish order; topic filtering happens on the receiving side.

use crate::events::{EventFilter, InboxEvent};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Sink for committed inbox events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish one event; returns how many subscribers it reached.
    async fn publish(&self, event: InboxEvent) -> usize;

    /// Events published since creation, including ones nobody received.
    fn events_published(&self) -> u64;
}

/// In-process bus over `tokio::sync::broadcast`.
#[derive(Debug)]
pub struct InMemoryEventBus {
    sender: broadcast::Sender<InboxEvent>,
    published: AtomicU64,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);
        Self {
            sender,
            published: AtomicU64::new(0),
        }
    }

    /// Subscribe to events published from now on that pass `filter`.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, "Subscribed to inbox events");
        Subscription::new(self.sender.subscribe(), filter)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: InboxEvent) -> usize {
        let topic = event.topic();
        self.published.fetch_add(1, Ordering::Relaxed);

        // An error here only means there are no receivers
        let reached = self.sender.send(event).unwrap_or(0);
        trace!(?topic, reached, "Inbox event published");
        reached
    }

    fn events_published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}
