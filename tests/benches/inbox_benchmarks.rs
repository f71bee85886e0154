//! # Sequencer-Inbox Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | si-02 Sequencer Inbox | accumulator step over growing batch sizes |
//! | si-02 Sequencer Inbox | full submission without refund |
//! | si-01 Gas Refund | rate-limited refund decision |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use primitive_types::U256;
use shared_types::entities::{Address, Hash, TimeBounds};
use si_01_gas_refund::{
    BudgetLedger, GasRefundOptimized, OptimizedRefundConfig, RecordingTransfer, RefundClaim,
};
use si_02_sequencer_inbox::{batch_data_hash, next_accumulator};
use si_tests::integration::fixtures::Fixture;
use std::time::Duration;

// ============================================================================
// SI-02: Accumulator
// ============================================================================

fn bench_accumulator_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("si-02-accumulator");
    group.measurement_time(Duration::from_secs(5));

    let bounds = TimeBounds {
        min_timestamp: 1,
        max_timestamp: 2,
        min_block_number: 3,
        max_block_number: 4,
    };

    for size in [0usize, 1_024, 32_768, 117_964] {
        let data = vec![0xa5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("hash_and_chain", size), &data, |b, data| {
            b.iter(|| {
                let data_hash = batch_data_hash(&bounds, 7, black_box(data));
                next_accumulator(Hash::repeat_byte(1), data_hash, Hash::repeat_byte(2))
            })
        });
    }

    group.finish();
}

// ============================================================================
// SI-02: Submission
// ============================================================================

fn bench_submission(c: &mut Criterion) {
    use si_02_sequencer_inbox::SequencerInboxApi;

    let mut group = c.benchmark_group("si-02-submission");

    group.bench_function("submit_64_byte_batch", |b| {
        let mut fx = Fixture::new();
        b.iter(|| {
            let (caller, submission) = fx.next_request(1, Address::zero()).into_submission();
            black_box(fx.handler.service_mut().submit(caller, submission).is_ok())
        })
    });

    group.finish();
}

// ============================================================================
// SI-01: Rate-limited refund
// ============================================================================

fn bench_optimized_refund(c: &mut Criterion) {
    let mut group = c.benchmark_group("si-01-gas-refund");

    let spender = Address::repeat_byte(0x51);
    let poster = Address::repeat_byte(0x03);
    let transfer = RecordingTransfer::new();
    let claim = RefundClaim {
        spender,
        recipient: poster,
        gas_used: 150_000,
        gas_price: U256::from(30_000_000_000u64),
        calldata_len: 4_096,
        timestamp: 0,
    };

    group.bench_function("optimized_refund_decision", |b| {
        b.iter_batched(
            || {
                GasRefundOptimized::new(
                    OptimizedRefundConfig::new(spender, poster),
                    BudgetLedger::with_balance(Address::zero(), U256::MAX),
                    0,
                )
                .ok()
            },
            |policy| policy.map(|mut p| p.refund(black_box(&claim), &transfer).is_ok()),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_accumulator_step,
    bench_submission,
    bench_optimized_refund,
);
criterion_main!(benches);
