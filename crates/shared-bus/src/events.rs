//! # Inbox Events
//!
//! Defines all event types that flow through the shared bus.
//! These are the observable side effects of batch sequencing and gas refunds.

use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, BatchDataLocation, Hash, TimeBounds, U256};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboxEvent {
    // =========================================================================
    // SUBSYSTEM 2: SEQUENCER INBOX
    // =========================================================================
    /// A batch was accepted and appended to the sequenced log.
    SequencerBatchDelivered {
        /// Zero-based sequence number of the batch.
        batch_sequence_number: u64,
        /// Inbox accumulator before this batch.
        before_acc: Hash,
        /// Inbox accumulator after this batch.
        after_acc: Hash,
        /// Delayed queue accumulator the batch commits to.
        delayed_acc: Hash,
        /// Delayed messages read once this batch is executed.
        after_delayed_messages_read: u64,
        /// Execution window recorded for the batch.
        time_bounds: TimeBounds,
        /// Where the batch data can be found.
        data_location: BatchDataLocation,
        /// Sequenced message count after this batch.
        sequenced_message_count: u64,
    },

    /// Batch data published separately (contract-origin submissions only).
    SequencerBatchData {
        /// Sequence number of the batch this data belongs to.
        batch_sequence_number: u64,
        /// Raw batch bytes.
        data: Vec<u8>,
    },

    // =========================================================================
    // SUBSYSTEM 1: GAS REFUND
    // =========================================================================
    /// A reimbursement was disbursed to the poster.
    RefundPaid {
        /// Address of the refund policy that paid.
        refunder: Address,
        /// Recipient of the payout.
        recipient: Address,
        /// Amount actually disbursed (may be below `nominal`).
        amount: U256,
        /// Amount the policy computed before clamping.
        nominal: U256,
    },

    /// A reimbursement was denied or degraded to zero.
    RefundDenied {
        /// Address of the refund target that was asked.
        refunder: Address,
        /// Intended recipient.
        recipient: Address,
        /// Reason for the denial.
        reason: String,
    },

    /// The budget of a refund policy was topped up.
    BudgetFunded {
        refunder: Address,
        from: Address,
        amount: U256,
        balance: U256,
    },

    /// The operator withdrew from the budget of a refund policy.
    BudgetWithdrawn {
        refunder: Address,
        operator: Address,
        amount: U256,
        balance: U256,
    },

    /// An allow-list of a refund policy changed.
    AllowlistUpdated {
        refunder: Address,
        /// Which list changed (`contracts` or `refundees`).
        list: String,
        /// Addresses added or removed.
        addresses: Vec<Address>,
        /// `true` when added, `false` when removed.
        allowed: bool,
    },

    // =========================================================================
    // CRITICAL EVENTS (DLQ)
    // =========================================================================
    /// Critical error requiring operator attention.
    CriticalError {
        /// The subsystem that encountered the error.
        subsystem_id: u8,
        /// Error description.
        error: String,
    },
}

impl InboxEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::SequencerBatchDelivered { .. } | Self::SequencerBatchData { .. } => {
                EventTopic::Sequencer
            }
            Self::RefundPaid { .. }
            | Self::RefundDenied { .. }
            | Self::BudgetFunded { .. }
            | Self::BudgetWithdrawn { .. }
            | Self::AllowlistUpdated { .. } => EventTopic::GasRefund,
            Self::CriticalError { .. } => EventTopic::DeadLetterQueue,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Subsystem 1 events.
    GasRefund,
    /// Subsystem 2 events.
    Sequencer,
    /// Dead Letter Queue for critical errors.
    DeadLetterQueue,
    /// All events (no filtering).
    All,
}

/// Topic filter applied by a subscription.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty or containing `All` accepts everything.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    #[must_use]
    pub fn matches(&self, event: &InboxEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
