//! IPC payloads for the Sequencer Inbox.

use crate::domain::entities::{BatchData, BatchSubmission, SubmissionOrigin};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::entities::Address;

/// Submit a batch on behalf of `caller`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitBatchRequest {
    pub correlation_id: [u8; 16],
    /// Account that signed the submission
    pub caller: Address,
    pub sequence_number: u64,
    pub data: BatchData,
    pub after_delayed_messages_read: u64,
    /// Zero address means no refund
    pub refund_target: Address,
    pub previous_message_count: u64,
    pub new_message_count: u64,
    pub origin: SubmissionOrigin,
}

impl SubmitBatchRequest {
    /// Split into the caller and the domain submission.
    pub fn into_submission(self) -> (Address, BatchSubmission) {
        (
            self.caller,
            BatchSubmission {
                sequence_number: self.sequence_number,
                data: self.data,
                after_delayed_messages_read: self.after_delayed_messages_read,
                refund_target: self.refund_target,
                previous_message_count: self.previous_message_count,
                new_message_count: self.new_message_count,
                origin: self.origin,
            },
        )
    }
}

/// Force-include delayed messages up to a new total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceInclusionRequest {
    pub correlation_id: [u8; 16],
    pub new_total_delayed_messages_read: u64,
}

/// Response to either request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub correlation_id: [u8; 16],
    pub success: bool,
    /// Set when a batch was appended
    pub batch_sequence_number: Option<u64>,
    /// Count after the call, whether or not it succeeded
    pub sequenced_message_count: u64,
    /// Amount disbursed to the caller, if a refund was attempted
    pub refund_paid: Option<U256>,
    pub error: Option<String>,
}
