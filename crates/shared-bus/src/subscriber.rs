//! # Event Subscriber
//!
//! Filtered receiving end of the bus.

use crate::events::{EventFilter, InboxEvent};
use thiserror::Error;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::broadcast::Receiver;
use tracing::warn;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Every publisher handle is gone.
    #[error("Event bus closed")]
    Closed,
}

/// Receives the events of one bus that pass a filter.
///
/// A subscriber that falls more than the channel capacity behind skips the
/// overwritten events and continues with the oldest one still buffered.
#[derive(Debug)]
pub struct Subscription {
    receiver: Receiver<InboxEvent>,
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: Receiver<InboxEvent>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Wait for the next matching event; `None` once the bus is dropped.
    pub async fn recv(&mut self) -> Option<InboxEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Subscriber lagged"),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next matching event if one is already buffered.
    pub fn try_recv(&mut self) -> Result<Option<InboxEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => warn!(skipped, "Subscriber lagged"),
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Closed) => return Err(SubscriptionError::Closed),
            }
        }
    }

    /// Take every matching event currently buffered, oldest first.
    pub fn drain(&mut self) -> Vec<InboxEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.try_recv() {
            events.push(event);
        }
        events
    }
}
