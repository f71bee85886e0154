//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::{BatchSubmission, SequencedBatch};
use crate::domain::errors::SequencerError;
use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, Hash};
use si_01_gas_refund::{Disbursement, RefundDenied};

/// What happened to the refund step of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundOutcome {
    pub refunder: Address,
    pub recipient: Address,
    pub result: Result<Disbursement, RefundDenied>,
}

impl RefundOutcome {
    /// Amount actually paid, zero when denied.
    pub fn paid(&self) -> primitive_types::U256 {
        self.result
            .as_ref()
            .map(|d| d.amount)
            .unwrap_or_default()
    }
}

/// Result of an accepted submission or force inclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub batch: SequencedBatch,
    /// Raw data to publish separately (contract-origin submissions only)
    pub separate_data: Option<Vec<u8>>,
    pub refund: Option<RefundOutcome>,
}

/// Snapshot of the inbox counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxStatus {
    pub batch_count: u64,
    pub sequenced_message_count: u64,
    pub total_delayed_messages_read: u64,
    pub head_accumulator: Hash,
}

/// Primary Sequencer Inbox API
///
/// All mutating calls either commit fully or fail with no state change.
pub trait SequencerInboxApi {
    /// Append a poster batch.
    ///
    /// Checks, in order: poster allow-list, origin, previous count,
    /// sequence number, delayed window, data size, count regression.
    /// The refund step runs after the batch is committed and cannot fail it.
    fn submit(
        &mut self,
        caller: Address,
        submission: BatchSubmission,
    ) -> Result<SubmitReceipt, SequencerError>;

    /// Include aged delayed messages without a poster. Permissionless.
    fn force_inclusion(&mut self, new_total_delayed_read: u64)
        -> Result<SubmitReceipt, SequencerError>;

    fn batch_count(&self) -> u64;

    fn sequenced_message_count(&self) -> u64;

    fn total_delayed_messages_read(&self) -> u64;

    /// Accumulator after batch `index`.
    fn inbox_accumulator(&self, index: u64) -> Option<Hash>;

    fn batch(&self, index: u64) -> Option<&SequencedBatch>;

    fn status(&self) -> InboxStatus;
}
