//! Error types for the Sequencer Inbox

use shared_types::entities::Address;
use shared_types::errors::PortError;
use thiserror::Error;

/// How a claimed delayed-read count falls outside the valid window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowViolation {
    /// Claims fewer delayed messages than already acknowledged
    #[error("delayed read {requested} is behind watermark {watermark}")]
    Backwards { watermark: u64, requested: u64 },

    /// Claims delayed messages that have not arrived
    #[error("delayed read {requested} exceeds observed delayed count {observed}")]
    TooFar { observed: u64, requested: u64 },
}

/// All errors that can occur when appending to the inbox
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
    /// Submitted sequence number is not the next index
    #[error("Out of sequence: expected batch {expected}, got {actual}")]
    OutOfSequence { expected: u64, actual: u64 },

    /// Claimed previous message count is stale
    #[error("Count mismatch: ledger at {expected}, batch claims {actual}")]
    CountMismatch { expected: u64, actual: u64 },

    /// Claimed delayed-read count outside the valid window
    #[error("Delayed window violation: {reason}")]
    DelayedWindowViolation { reason: WindowViolation },

    /// Caller is not an allow-listed batch poster
    #[error("Not a batch poster: {caller:?}")]
    NotBatchPoster { caller: Address },

    /// Origin-only submission relayed through a contract
    #[error("Caller {caller:?} is not the transaction origin")]
    NotOrigin { caller: Address },

    /// Batch payload exceeds the configured maximum
    #[error("Data too large: {size} > {max}")]
    DataTooLarge { size: usize, max: usize },

    /// New message count is below the previous one
    #[error("Message count regression: {previous} -> {new}")]
    MessageCountRegression { previous: u64, new: u64 },

    /// Delayed message has not aged past the delay bounds
    #[error("Force inclusion too soon for delayed message {index}")]
    ForceIncludeTooSoon { index: u64 },

    /// Nothing beyond the watermark to include
    #[error("Nothing to force include: watermark {watermark}, requested {requested}")]
    NothingToForceInclude { watermark: u64, requested: u64 },

    /// Count arithmetic would overflow
    #[error("Message count overflow")]
    CountOverflow,

    /// An outbound port failed
    #[error("Port error: {0}")]
    Port(#[from] PortError),
}

/// Result of a sequencer operation.
pub type SequencerResult<T> = Result<T, SequencerError>;

impl SequencerError {
    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OutOfSequence { .. } => "out_of_sequence",
            Self::CountMismatch { .. } => "count_mismatch",
            Self::DelayedWindowViolation { .. } => "delayed_window_violation",
            Self::NotBatchPoster { .. } => "not_batch_poster",
            Self::NotOrigin { .. } => "not_origin",
            Self::DataTooLarge { .. } => "data_too_large",
            Self::MessageCountRegression { .. } => "message_count_regression",
            Self::ForceIncludeTooSoon { .. } => "force_include_too_soon",
            Self::NothingToForceInclude { .. } => "nothing_to_force_include",
            Self::CountOverflow => "count_overflow",
            Self::Port(_) => "port",
        }
    }
}

impl From<WindowViolation> for SequencerError {
    fn from(reason: WindowViolation) -> Self {
        Self::DelayedWindowViolation { reason }
    }
}

/// Invalid inbox configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InboxConfigError {
    #[error("Inbox address must be non-zero")]
    ZeroInboxAddress,

    #[error("Max data size must be non-zero")]
    ZeroMaxDataSize,
}
