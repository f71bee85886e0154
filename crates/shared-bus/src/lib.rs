//! # Shared Bus - Event Bus for Inbox Events
//!
//! Carries the observable side effects of the sequencer inbox and the gas
//! refund policies to whoever subscribes (indexers, monitors, tests).
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────────┐                    ┌──────────────────┐
//! │ Sequencer Inbox  │                    │ Subscriber       │
//! │                  │    publish()       │ (indexer, alert) │
//! │                  │ ──────┐            │                  │
//! └──────────────────┘       │            └──────────────────┘
//!                            ▼                    ↑
//!                      ┌──────────────┐          │
//!                      │  Event Bus   │          │
//!                      │              │ ─────────┘
//!                      └──────────────┘  subscribe()
//! ```
//!
//! Events are emitted only after the state transition that produced them has
//! committed; the bus never feeds back into the sequencing decision.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, InboxEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};

/// Events buffered per subscriber before the slowest one starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
