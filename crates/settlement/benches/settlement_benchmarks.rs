use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rust_decimal::Decimal;
use splitledger_core::UserId;
use splitledger_settlement::{settle, NetBalances};
use uuid::Uuid;

/// Deterministic pseudo-random cent amounts (xorshift), closed to sum zero.
fn closed_balances(n: usize) -> NetBalances {
    let mut state: u64 = 0x5eed_1234_abcd_9876;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 2_000_001) as i64 - 1_000_000
    };

    let mut pairs: Vec<(UserId, Decimal)> = (0..n)
        .map(|i| (UserId::from_uuid(Uuid::from_u128(i as u128 + 1)), Decimal::new(next(), 2)))
        .collect();
    let total: Decimal = pairs.iter().map(|(_, b)| *b).sum();
    pairs[n - 1].1 -= total;
    pairs.into_iter().collect()
}

fn bench_settlement_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("settlement_sweep");
    for participants in [10usize, 100, 1_000, 10_000] {
        let balances = closed_balances(participants);
        group.throughput(Throughput::Elements(participants as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(participants),
            &balances,
            |b, balances| b.iter(|| settle(black_box(balances)).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_settlement_sweep);
criterion_main!(benches);
