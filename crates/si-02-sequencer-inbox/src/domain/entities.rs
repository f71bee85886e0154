//! Core entities for the Sequencer Inbox
//!
//! ## Clusters
//!
//! - **Submission**: `BatchSubmission`, `BatchData`, `DaPointer`, `SubmissionOrigin`
//! - **Log**: `SequencedBatch`, `InboxState`

use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, BatchDataLocation, Hash, TimeBounds};
use std::borrow::Cow;

// =============================================================================
// CLUSTER A: SUBMISSION
// =============================================================================

/// Header flag marking a data-availability pointer.
pub const DA_HEADER_FLAG: u8 = 0x63;

/// Reference to batch data held by an external data-availability layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaPointer {
    /// Provider header flag, first byte of the encoded pointer
    pub header_flag: u8,
    /// Height of the DA block holding the data
    pub block_height: u64,
    /// Commitment to the data in that block
    pub commitment: Hash,
}

impl DaPointer {
    /// Encoded length: flag, height, commitment.
    pub const ENCODED_LEN: usize = 1 + 8 + 32;

    pub fn new(block_height: u64, commitment: Hash) -> Self {
        Self {
            header_flag: DA_HEADER_FLAG,
            block_height,
            commitment,
        }
    }

    /// `header_flag ‖ block_height (BE) ‖ commitment`
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::ENCODED_LEN);
        out.push(self.header_flag);
        out.extend_from_slice(&self.block_height.to_be_bytes());
        out.extend_from_slice(self.commitment.as_bytes());
        out
    }
}

/// The payload a batch commits to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchData {
    /// Opaque bytes posted with the submission
    Inline(Vec<u8>),
    /// Pointer to data held elsewhere
    External(DaPointer),
    /// No payload (force-included delayed messages)
    Empty,
}

impl BatchData {
    /// Bytes hashed into the accumulator.
    pub fn encoded(&self) -> Cow<'_, [u8]> {
        match self {
            Self::Inline(bytes) => Cow::Borrowed(bytes.as_slice()),
            Self::External(pointer) => Cow::Owned(pointer.encode()),
            Self::Empty => Cow::Borrowed(&[]),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Inline(bytes) => bytes.len(),
            Self::External(_) => DaPointer::ENCODED_LEN,
            Self::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How a submission reached the inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionOrigin {
    /// The poster called the inbox directly; data is in the transaction input
    FromOrigin,
    /// A contract relayed the submission; data is published separately
    FromContract,
}

/// One poster submission, as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSubmission {
    pub sequence_number: u64,
    pub data: BatchData,
    pub after_delayed_messages_read: u64,
    /// Refund policy address; zero means no refund
    pub refund_target: Address,
    pub previous_message_count: u64,
    pub new_message_count: u64,
    pub origin: SubmissionOrigin,
}

impl BatchSubmission {
    /// Where the batch data ends up for this submission.
    ///
    /// A relayed submission publishes any non-empty payload, DA pointers
    /// included, in its own event.
    pub fn data_location(&self) -> BatchDataLocation {
        match (&self.data, self.origin) {
            (BatchData::Empty, _) => BatchDataLocation::NoData,
            (_, SubmissionOrigin::FromContract) => BatchDataLocation::SeparateBatchEvent,
            (BatchData::External(_), SubmissionOrigin::FromOrigin) => {
                BatchDataLocation::DataAvailability
            }
            (BatchData::Inline(_), SubmissionOrigin::FromOrigin) => BatchDataLocation::TxInput,
        }
    }

    /// Calldata bytes the poster paid for in this call.
    pub fn calldata_len(&self) -> u64 {
        match self.origin {
            SubmissionOrigin::FromOrigin => self.data.len() as u64,
            SubmissionOrigin::FromContract => 0,
        }
    }
}

// =============================================================================
// CLUSTER B: LOG
// =============================================================================

/// An accepted batch. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedBatch {
    pub sequence_number: u64,
    pub before_acc: Hash,
    pub after_acc: Hash,
    pub delayed_acc: Hash,
    pub data_hash: Hash,
    pub after_delayed_messages_read: u64,
    pub previous_message_count: u64,
    pub new_message_count: u64,
    pub time_bounds: TimeBounds,
    pub data_location: BatchDataLocation,
    /// Poster that submitted the batch; `None` for force inclusion
    pub submitted_by: Option<Address>,
}

impl SequencedBatch {
    /// Messages this batch added to the sequenced count.
    pub fn message_count(&self) -> u64 {
        self.new_message_count.saturating_sub(self.previous_message_count)
    }
}

/// Durable state of the inbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxState {
    /// Append-only batch log
    pub batches: Vec<SequencedBatch>,
    pub sequenced_message_count: u64,
    /// Delayed messages acknowledged so far (watermark)
    pub total_delayed_messages_read: u64,
}

impl InboxState {
    pub fn batch_count(&self) -> u64 {
        self.batches.len() as u64
    }

    /// Accumulator after the last batch, zero when empty.
    pub fn head_accumulator(&self) -> Hash {
        self.batches
            .last()
            .map(|b| b.after_acc)
            .unwrap_or_else(Hash::zero)
    }

    pub fn accumulator(&self, index: u64) -> Option<Hash> {
        self.batch(index).map(|b| b.after_acc)
    }

    pub fn batch(&self, index: u64) -> Option<&SequencedBatch> {
        usize::try_from(index).ok().and_then(|i| self.batches.get(i))
    }

    /// Append a batch and move the counters to its values.
    pub(crate) fn append(&mut self, batch: SequencedBatch) {
        self.sequenced_message_count = batch.new_message_count;
        self.total_delayed_messages_read = batch.after_delayed_messages_read;
        self.batches.push(batch);
    }
}
