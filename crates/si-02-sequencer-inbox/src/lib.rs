//! # SI-02: Sequencer Inbox
//!
//! Accepts batches from authorized posters, checks them against the
//! sequenced log and the delayed queue, chains them into a hash
//! accumulator and reimburses the poster through the gas refund subsystem.
//!
//! ## Architecture
//!
//! - **Domain**: `InboxState`, `SequencedBatch`, accumulator hashing, invariants
//! - **Ports**: Inbound (`SequencerInboxApi`) and Outbound (`DelayedQueueView`,
//!   `BatchPosterRegistry`, `HostEnvironment`)
//! - **Adapters**: In-memory delayed queue, static poster list, manual host clock
//! - **Application**: `SequencerInboxService`
//! - **IPC**: Request payloads and the event-publishing handler
//!
//! ## Submission Flow
//!
//! ```text
//!  poster ──→ ┌──────────────────────────┐
//!             │ validate                 │  poster? origin? sequence?
//!             │                          │  count? delayed window? size?
//!             └────────────┬─────────────┘
//!                          ▼
//!             ┌──────────────────────────┐      ┌──────────────────┐
//!             │ time bounds + acc chain  │ ←─── │ DelayedQueueView │
//!             └────────────┬─────────────┘      └──────────────────┘
//!                          ▼
//!             ┌──────────────────────────┐
//!             │ append (commit point)    │
//!             └────────────┬─────────────┘
//!                          ▼
//!             ┌──────────────────────────┐
//!             │ refund (isolated)        │ ──→ si-01 RefundRegistry
//!             └──────────────────────────┘
//! ```
//!
//! Every rejection leaves the log, the message count and the delayed
//! watermark exactly as they were.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod metrics;
pub mod ports;

pub use adapters::{InMemoryDelayedQueue, ManualHost, StaticPosterRegistry};
pub use application::SequencerInboxService;
pub use config::{InboxConfig, MaxTimeVariation};
pub use domain::*;
pub use ipc::{
    BatchResponse, ForceInclusionRequest, SequencerInboxHandler, SubmitBatchRequest,
};
pub use ports::*;

/// Subsystem label used in structured logs.
pub const SUBSYSTEM: &str = "sequencer-inbox";

/// Subsystem id carried by events this crate publishes.
pub const SUBSYSTEM_ID: u8 = 2;
