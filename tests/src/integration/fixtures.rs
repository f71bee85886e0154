//! Shared wiring for the integration tests and benchmarks.

use primitive_types::U256;
use shared_bus::InMemoryEventBus;
use shared_types::entities::{Address, Hash};
use si_01_gas_refund::{
    BudgetLedger, GasRefundBudget, GasRefundOptimized, OptimizedRefundConfig, RecordingTransfer,
};
use si_02_sequencer_inbox::{
    BatchData, DelayedQueueView, HostEnvironment, InMemoryDelayedQueue, InboxConfig, ManualHost,
    SequencerInboxApi, SequencerInboxHandler, SequencerInboxService, StaticPosterRegistry,
    SubmissionOrigin, SubmitBatchRequest,
};
use inbox_telemetry::{init_logging, TelemetryConfig};
use std::sync::{Arc, Once};

pub const GENESIS_BLOCK: u64 = 1_000;
pub const GENESIS_TIME: u64 = 1_700_000_000;
pub const EPOCH_LENGTH: u64 = 3_600;
pub const EPOCH_CEILING: u64 = 50_000;

pub fn poster() -> Address {
    Address::repeat_byte(0x03)
}

pub fn second_poster() -> Address {
    Address::repeat_byte(0x04)
}

pub fn operator() -> Address {
    Address::repeat_byte(0x01)
}

/// Address the coarse allow-list policy is registered under.
pub fn coarse_refunder() -> Address {
    Address::repeat_byte(0xb0)
}

/// Address the rate-limited policy is registered under.
pub fn optimized_refunder() -> Address {
    Address::repeat_byte(0xb1)
}

static LOGGING: Once = Once::new();

/// Install a quiet subscriber once per test binary. `SI_LOG_LEVEL` overrides it.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let config = TelemetryConfig::from_lookup(|key| match key {
            "SI_LOG_LEVEL" => std::env::var(key).ok().or_else(|| Some("warn".to_string())),
            _ => std::env::var(key).ok(),
        });
        // Another harness may own the global subscriber
        let _ = init_logging(&config);
    });
}

pub fn correlation_id() -> [u8; 16] {
    *uuid::Uuid::new_v4().as_bytes()
}

/// A fully wired inbox: handler over a service, the bus it publishes to,
/// and handles on every in-memory adapter.
pub struct Fixture {
    pub handler: SequencerInboxHandler,
    pub bus: Arc<InMemoryEventBus>,
    pub delayed: Arc<InMemoryDelayedQueue>,
    pub host: Arc<ManualHost>,
    pub posters: Arc<StaticPosterRegistry>,
    pub transfer: Arc<RecordingTransfer>,
}

impl Fixture {
    /// Both refund policies are registered with empty ledgers.
    pub fn new() -> Self {
        init_test_logging();
        let config = InboxConfig::default();
        let inbox = config.inbox_address;

        let delayed = Arc::new(InMemoryDelayedQueue::new());
        let posters = Arc::new(StaticPosterRegistry::new([poster(), second_poster()]));
        let host = Arc::new(ManualHost::new(GENESIS_BLOCK, GENESIS_TIME));
        host.set_tx_origin(poster());
        host.set_gas(1_000, U256::from(2u64));
        let transfer = Arc::new(RecordingTransfer::new());

        let mut coarse = GasRefundBudget::new(operator());
        coarse.allow_contracts(&[inbox]);
        coarse.allow_refundees(&[poster(), second_poster()]);

        let optimized = GasRefundOptimized::new(
            OptimizedRefundConfig {
                extra_gas: 10_000,
                calldata_cost: 16,
                epoch_length: EPOCH_LENGTH,
                epoch_ceiling: U256::from(EPOCH_CEILING),
                ..OptimizedRefundConfig::new(inbox, poster())
            },
            BudgetLedger::new(operator()),
            GENESIS_TIME,
        )
        .unwrap_or_else(|e| panic!("fixture refund config rejected: {e}"));

        let mut service = SequencerInboxService::new(
            config,
            delayed.clone(),
            posters.clone(),
            host.clone(),
            transfer.clone(),
        )
        .unwrap_or_else(|e| panic!("fixture inbox config rejected: {e}"));
        service.refunds_mut().register(coarse_refunder(), coarse);
        service.refunds_mut().register(optimized_refunder(), optimized);

        let bus = Arc::new(InMemoryEventBus::new());
        let handler = SequencerInboxHandler::new(service, bus.clone());

        Self {
            handler,
            bus,
            delayed,
            host,
            posters,
            transfer,
        }
    }

    /// Append `n` delayed messages at the current host block and time.
    pub fn push_delayed(&self, n: u64) {
        let start = self.delayed.delayed_message_count();
        for i in start..start + n {
            self.delayed.push(
                self.host.block_number(),
                self.host.timestamp(),
                Hash::from_low_u64_be(i + 1),
            );
        }
    }

    /// Request from `poster()` extending the current head by `messages`.
    pub fn next_request(&self, messages: u64, refund_target: Address) -> SubmitBatchRequest {
        let service = self.handler.service();
        let previous = service.sequenced_message_count();
        SubmitBatchRequest {
            correlation_id: correlation_id(),
            caller: poster(),
            sequence_number: service.batch_count(),
            data: BatchData::Inline(vec![0x5a; 64]),
            after_delayed_messages_read: service.total_delayed_messages_read(),
            refund_target,
            previous_message_count: previous,
            new_message_count: previous + messages,
            origin: SubmissionOrigin::FromOrigin,
        }
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
