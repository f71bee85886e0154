//! Sequencer Inbox Service
//!
//! Main service implementing `SequencerInboxApi`.
//!
//! Single writer: every mutating call takes `&mut self` and runs to
//! completion, so of two submissions built against the same head the
//! second always sees `CountMismatch`.

use crate::config::InboxConfig;
use crate::domain::accumulator::{batch_data_hash, next_accumulator};
use crate::domain::entities::{BatchSubmission, InboxState, SequencedBatch, SubmissionOrigin};
use crate::domain::errors::{InboxConfigError, SequencerError, SequencerResult, WindowViolation};
use crate::domain::invariants;
use crate::metrics;
use crate::ports::inbound::{InboxStatus, RefundOutcome, SequencerInboxApi, SubmitReceipt};
use crate::ports::outbound::{BatchPosterRegistry, DelayedQueueView, HostEnvironment};
use crate::SUBSYSTEM;
use inbox_telemetry::{log_batch_event, log_refund_event};
use shared_types::entities::{Address, BatchDataLocation, Hash, TimeBounds};
use si_01_gas_refund::{RefundClaim, RefundRegistry, RefundTransfer};
use std::sync::Arc;
use tracing::debug;

/// Sequencer Inbox Service
///
/// Orchestrates a submission:
/// 1. Validate against the poster list, the log head and the delayed queue
/// 2. Compute time bounds and the next accumulator
/// 3. Append the batch
/// 4. Run the refund step, whose failure is recorded and dropped
pub struct SequencerInboxService {
    config: InboxConfig,
    state: InboxState,
    delayed: Arc<dyn DelayedQueueView>,
    posters: Arc<dyn BatchPosterRegistry>,
    host: Arc<dyn HostEnvironment>,
    refunds: RefundRegistry,
    transfer: Arc<dyn RefundTransfer>,
}

impl SequencerInboxService {
    /// Create a service with an empty log and no refund policies.
    pub fn new(
        config: InboxConfig,
        delayed: Arc<dyn DelayedQueueView>,
        posters: Arc<dyn BatchPosterRegistry>,
        host: Arc<dyn HostEnvironment>,
        transfer: Arc<dyn RefundTransfer>,
    ) -> Result<Self, InboxConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: InboxState::default(),
            delayed,
            posters,
            host,
            refunds: RefundRegistry::new(),
            transfer,
        })
    }

    /// Replace the refund registry.
    pub fn with_refunds(mut self, refunds: RefundRegistry) -> Self {
        self.refunds = refunds;
        self
    }

    /// Resume from persisted state.
    pub fn with_state(mut self, state: InboxState) -> Self {
        self.state = state;
        self
    }

    pub fn config(&self) -> &InboxConfig {
        &self.config
    }

    /// Persistable snapshot of the log and counters.
    pub fn state(&self) -> &InboxState {
        &self.state
    }

    pub fn refunds(&self) -> &RefundRegistry {
        &self.refunds
    }

    pub fn refunds_mut(&mut self) -> &mut RefundRegistry {
        &mut self.refunds
    }

    pub fn transfer(&self) -> Arc<dyn RefundTransfer> {
        Arc::clone(&self.transfer)
    }

    /// Whether the whole log satisfies the inbox invariants.
    pub fn verify_log(&self) -> bool {
        invariants::check_all(&self.state)
    }

    fn check_delayed_window(&self, requested: u64) -> Result<(), WindowViolation> {
        let watermark = self.state.total_delayed_messages_read;
        if requested < watermark {
            return Err(WindowViolation::Backwards {
                watermark,
                requested,
            });
        }
        let observed = self.delayed.delayed_message_count();
        if requested > observed {
            return Err(WindowViolation::TooFar {
                observed,
                requested,
            });
        }
        Ok(())
    }

    /// All submission checks. Touches no state.
    fn validate_submission(
        &self,
        caller: Address,
        submission: &BatchSubmission,
    ) -> SequencerResult<()> {
        if !self.posters.is_batch_poster(&caller) {
            return Err(SequencerError::NotBatchPoster { caller });
        }
        if submission.origin == SubmissionOrigin::FromOrigin && caller != self.host.tx_origin() {
            return Err(SequencerError::NotOrigin { caller });
        }

        // A lost race shows up as a stale count before a stale index
        if submission.previous_message_count != self.state.sequenced_message_count {
            return Err(SequencerError::CountMismatch {
                expected: self.state.sequenced_message_count,
                actual: submission.previous_message_count,
            });
        }

        let expected = self.state.batch_count();
        if submission.sequence_number != expected {
            return Err(SequencerError::OutOfSequence {
                expected,
                actual: submission.sequence_number,
            });
        }

        self.check_delayed_window(submission.after_delayed_messages_read)?;

        let size = submission.data.len();
        if size > self.config.max_data_size {
            return Err(SequencerError::DataTooLarge {
                size,
                max: self.config.max_data_size,
            });
        }

        if submission.new_message_count < submission.previous_message_count {
            return Err(SequencerError::MessageCountRegression {
                previous: submission.previous_message_count,
                new: submission.new_message_count,
            });
        }

        Ok(())
    }

    /// Accumulator of the last included delayed message, zero when none.
    fn delayed_accumulator(&self, after_delayed_messages_read: u64) -> SequencerResult<Hash> {
        match after_delayed_messages_read.checked_sub(1) {
            None => Ok(Hash::zero()),
            Some(index) => Ok(self.delayed.delayed_message(index)?.accumulator),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn build_batch(
        &self,
        data: &[u8],
        after_delayed_messages_read: u64,
        delayed_acc: Hash,
        new_message_count: u64,
        time_bounds: TimeBounds,
        data_location: BatchDataLocation,
        submitted_by: Option<Address>,
    ) -> SequencedBatch {
        let before_acc = self.state.head_accumulator();
        let data_hash = batch_data_hash(&time_bounds, after_delayed_messages_read, data);
        SequencedBatch {
            sequence_number: self.state.batch_count(),
            before_acc,
            after_acc: next_accumulator(before_acc, data_hash, delayed_acc),
            delayed_acc,
            data_hash,
            after_delayed_messages_read,
            previous_message_count: self.state.sequenced_message_count,
            new_message_count,
            time_bounds,
            data_location,
            submitted_by,
        }
    }

    fn try_submit(
        &mut self,
        caller: Address,
        submission: BatchSubmission,
    ) -> SequencerResult<SubmitReceipt> {
        self.validate_submission(caller, &submission)?;

        let time_bounds = self
            .config
            .max_time_variation
            .bounds_at(self.host.block_number(), self.host.timestamp());
        let delayed_acc = self.delayed_accumulator(submission.after_delayed_messages_read)?;
        let data_location = submission.data_location();
        let batch = self.build_batch(
            &submission.data.encoded(),
            submission.after_delayed_messages_read,
            delayed_acc,
            submission.new_message_count,
            time_bounds,
            data_location,
            Some(caller),
        );

        // Commit point: nothing below can fail the submission
        self.state.append(batch.clone());

        let separate_data = (data_location == BatchDataLocation::SeparateBatchEvent)
            .then(|| submission.data.encoded().into_owned());

        let refund = if submission.refund_target.is_zero() {
            None
        } else {
            Some(self.run_refund(caller, &submission, batch.sequence_number))
        };

        Ok(SubmitReceipt {
            batch,
            separate_data,
            refund,
        })
    }

    /// Isolated refund step. Never returns an error.
    fn run_refund(
        &mut self,
        caller: Address,
        submission: &BatchSubmission,
        sequence_number: u64,
    ) -> RefundOutcome {
        let refunder = submission.refund_target;
        let claim = RefundClaim {
            spender: self.config.inbox_address,
            recipient: caller,
            gas_used: self.host.gas_used(),
            gas_price: self.host.gas_price(),
            calldata_len: submission.calldata_len(),
            timestamp: self.host.timestamp(),
        };

        let result = self
            .refunds
            .refund(refunder, &claim, self.transfer.as_ref());

        match &result {
            Ok(paid) => {
                metrics::record_refund_paid(paid.amount);
                log_refund_event!(
                    info,
                    SUBSYSTEM,
                    "Refund paid",
                    refunder,
                    caller,
                    batch_sequence_number = sequence_number,
                    amount = %paid.amount,
                    nominal = %paid.nominal
                );
            }
            Err(denied) => {
                metrics::record_refund_denied(denied.label());
                log_refund_event!(
                    warn,
                    SUBSYSTEM,
                    "Refund denied, batch kept",
                    refunder,
                    caller,
                    batch_sequence_number = sequence_number,
                    reason = %denied
                );
            }
        }

        RefundOutcome {
            refunder,
            recipient: caller,
            result,
        }
    }

    fn try_force_inclusion(
        &mut self,
        new_total_delayed_read: u64,
    ) -> Result<SubmitReceipt, SequencerError> {
        let watermark = self.state.total_delayed_messages_read;
        if new_total_delayed_read <= watermark {
            return Err(SequencerError::NothingToForceInclude {
                watermark,
                requested: new_total_delayed_read,
            });
        }
        self.check_delayed_window(new_total_delayed_read)?;

        let index = new_total_delayed_read - 1;
        let message = self.delayed.delayed_message(index)?;
        let elapsed = self.config.max_time_variation.delay_elapsed(
            message.block_number,
            message.timestamp,
            self.host.block_number(),
            self.host.timestamp(),
        );
        if !elapsed {
            return Err(SequencerError::ForceIncludeTooSoon { index });
        }

        let new_message_count = self
            .state
            .sequenced_message_count
            .checked_add(new_total_delayed_read - watermark)
            .ok_or(SequencerError::CountOverflow)?;

        // Pinned to the arrival of the last included message
        let time_bounds = TimeBounds {
            min_timestamp: message.timestamp,
            max_timestamp: message.timestamp,
            min_block_number: message.block_number,
            max_block_number: message.block_number,
        };
        let batch = self.build_batch(
            &[],
            new_total_delayed_read,
            message.accumulator,
            new_message_count,
            time_bounds,
            BatchDataLocation::NoData,
            None,
        );

        self.state.append(batch.clone());

        Ok(SubmitReceipt {
            batch,
            separate_data: None,
            refund: None,
        })
    }

    fn record_outcome(
        &self,
        operation: &'static str,
        result: &Result<SubmitReceipt, SequencerError>,
    ) {
        match result {
            Ok(receipt) => {
                metrics::record_batch_accepted();
                log_batch_event!(
                    info,
                    SUBSYSTEM,
                    "Batch accepted",
                    receipt.batch.sequence_number,
                    operation = operation,
                    messages = receipt.batch.message_count(),
                    sequenced_message_count = receipt.batch.new_message_count,
                    after_delayed_messages_read = receipt.batch.after_delayed_messages_read,
                    after_acc = ?receipt.batch.after_acc
                );
            }
            Err(e) => {
                metrics::record_batch_rejected(e.label());
                log_batch_event!(
                    warn,
                    SUBSYSTEM,
                    "Batch rejected",
                    self.state.batch_count(),
                    operation = operation,
                    error = %e
                );
            }
        }
    }
}

impl SequencerInboxApi for SequencerInboxService {
    fn submit(
        &mut self,
        caller: Address,
        submission: BatchSubmission,
    ) -> Result<SubmitReceipt, SequencerError> {
        debug!(
            caller = ?caller,
            sequence_number = submission.sequence_number,
            "Submission received"
        );
        let result = self.try_submit(caller, submission);
        self.record_outcome("submit", &result);
        result
    }

    fn force_inclusion(
        &mut self,
        new_total_delayed_read: u64,
    ) -> Result<SubmitReceipt, SequencerError> {
        let result = self.try_force_inclusion(new_total_delayed_read);
        self.record_outcome("force_inclusion", &result);
        result
    }

    fn batch_count(&self) -> u64 {
        self.state.batch_count()
    }

    fn sequenced_message_count(&self) -> u64 {
        self.state.sequenced_message_count
    }

    fn total_delayed_messages_read(&self) -> u64 {
        self.state.total_delayed_messages_read
    }

    fn inbox_accumulator(&self, index: u64) -> Option<Hash> {
        self.state.accumulator(index)
    }

    fn batch(&self, index: u64) -> Option<&SequencedBatch> {
        self.state.batch(index)
    }

    fn status(&self) -> InboxStatus {
        InboxStatus {
            batch_count: self.state.batch_count(),
            sequenced_message_count: self.state.sequenced_message_count,
            total_delayed_messages_read: self.state.total_delayed_messages_read,
            head_accumulator: self.state.head_accumulator(),
        }
    }
}
