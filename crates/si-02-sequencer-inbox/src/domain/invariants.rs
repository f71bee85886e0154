//! Domain invariants for the Sequencer Inbox
//!
//! Checked over the whole batch log; used by tests and by
//! [`SequencerInboxService::verify_log`](crate::SequencerInboxService::verify_log).

use super::accumulator::next_accumulator;
use super::entities::InboxState;
use shared_types::entities::Hash;

/// INVARIANT-1: Dense Sequence
/// Batch `i` carries sequence number `i`.
pub fn invariant_dense_sequence(state: &InboxState) -> bool {
    state
        .batches
        .iter()
        .enumerate()
        .all(|(i, b)| b.sequence_number == i as u64)
}

/// INVARIANT-2: Count Continuity
/// Each batch starts where the previous ended, never decreases, and the
/// ledger count equals the sum of all batch message counts.
pub fn invariant_count_continuity(state: &InboxState) -> bool {
    let mut count = 0u64;
    for batch in &state.batches {
        if batch.previous_message_count != count
            || batch.new_message_count < batch.previous_message_count
        {
            return false;
        }
        count = batch.new_message_count;
    }
    count == state.sequenced_message_count
}

/// INVARIANT-3: Delayed Watermark Monotonic
/// `after_delayed_messages_read` never decreases along the log.
pub fn invariant_delayed_monotonic(state: &InboxState) -> bool {
    let monotonic = state
        .batches
        .windows(2)
        .all(|w| w[0].after_delayed_messages_read <= w[1].after_delayed_messages_read);
    let head = state
        .batches
        .last()
        .map(|b| b.after_delayed_messages_read)
        .unwrap_or(0);
    monotonic && head == state.total_delayed_messages_read
}

/// INVARIANT-4: Accumulator Chain
/// Every `before_acc` is the previous `after_acc`, and every `after_acc`
/// recomputes from its inputs.
pub fn invariant_accumulator_chain(state: &InboxState) -> bool {
    let mut prev = Hash::zero();
    for batch in &state.batches {
        if batch.before_acc != prev {
            return false;
        }
        if next_accumulator(batch.before_acc, batch.data_hash, batch.delayed_acc) != batch.after_acc
        {
            return false;
        }
        prev = batch.after_acc;
    }
    true
}

/// All log invariants together.
pub fn check_all(state: &InboxState) -> bool {
    invariant_dense_sequence(state)
        && invariant_count_continuity(state)
        && invariant_delayed_monotonic(state)
        && invariant_accumulator_chain(state)
}
