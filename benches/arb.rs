use alloy::primitives::{Address, U256};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gyre::arb::detector::find_negative_cycle;
use gyre::arb::evaluate::{Evaluator, VolumeMode};
use gyre::arb::market::MarketGraph;
use gyre::arb::numeric::FeeRate;
use gyre::arb::pool::Pool;
use rand::prelude::*;
use std::str::FromStr;

/// Generate a new random contract address
fn generate_random_address() -> Address {
    let addr_str = format!("0x{:040x}", fastrand::u64(..));
    Address::from_str(&addr_str).unwrap()
}

/// Generate a synthetic token universe of `token_count` symbols
fn generate_tokens(token_count: usize) -> Vec<(String, Address)> {
    (0..token_count)
        .map(|i| (format!("T{i}"), generate_random_address()))
        .collect()
}

/// Generate synthetic directed quotes for benchmarking.
///
/// The first `token_count` quotes lay a ring over the whole universe so
/// every token is reachable from `T0`; the rest pair random tokens with
/// random reserves, which is enough to shake out compounding loops.
fn generate_benchmark_pools(pool_count: usize, token_count: usize) -> Vec<Pool> {
    assert!(pool_count >= token_count);

    let mut rng = rand::rng();
    let tokens = generate_tokens(token_count);
    let mut pools = Vec::with_capacity(pool_count);

    let mut push_pool = |pools: &mut Vec<Pool>, idx1: usize, idx2: usize, rng: &mut ThreadRng| {
        let reserve_from = U256::from(rng.random_range(1_000..1_000_000u64));
        let reserve_to = U256::from(rng.random_range(1_000..1_000_000u64));
        let (from_symbol, from_address) = tokens[idx1].clone();
        let (to_symbol, to_address) = tokens[idx2].clone();
        let pool = Pool::try_new(
            from_symbol,
            from_address,
            to_symbol,
            to_address,
            generate_random_address(),
            reserve_from,
            reserve_to,
        )
        .unwrap();
        pools.push(pool);
    };

    for idx in 0..token_count {
        push_pool(&mut pools, idx, (idx + 1) % token_count, &mut rng);
    }

    for _ in token_count..pool_count {
        let idx1 = rng.random_range(0..token_count);
        let mut idx2 = rng.random_range(0..token_count);
        while idx1 == idx2 {
            idx2 = rng.random_range(0..token_count);
        }
        push_pool(&mut pools, idx1, idx2, &mut rng);
    }

    pools
}

/// A market built from the synthetic quotes
fn build_market(pools: &[Pool]) -> MarketGraph {
    let mut market = MarketGraph::new();
    for pool in pools {
        market.add_pool(pool);
    }
    market
}

/// Benchmark folding a batch of quotes into the market graph
fn bench_build_market(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_market");
    group.sample_size(20);

    for pool_count in [100, 500, 1000, 5000] {
        let token_count = (pool_count / 5).max(10);
        let pools = generate_benchmark_pools(pool_count, token_count);

        group.throughput(criterion::Throughput::Elements(pool_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(pool_count),
            &pools,
            |b, pools| b.iter(|| build_market(black_box(pools))),
        );
    }

    group.finish();
}

/// Benchmark the relaxation sweep and cycle walk on a built market
fn bench_find_negative_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_negative_cycle");
    group.sample_size(20);

    for pool_count in [100, 500, 1000, 5000] {
        let token_count = (pool_count / 5).max(10);
        let pools = generate_benchmark_pools(pool_count, token_count);
        let market = build_market(&pools);
        let source = market.node("T0").unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(pool_count),
            &market,
            |b, market| b.iter(|| find_negative_cycle(black_box(market), source)),
        );
    }

    group.finish();
}

/// Benchmark the full pipeline: detection, reduction and exact sizing
fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    group.sample_size(20);
    group.measurement_time(std::time::Duration::from_secs(5));

    let evaluator = Evaluator::new(FeeRate::default(), VolumeMode::Exact);

    for pool_count in [100, 500, 1000] {
        let token_count = (pool_count / 5).max(10);
        let pools = generate_benchmark_pools(pool_count, token_count);
        let market = build_market(&pools);

        group.bench_with_input(
            BenchmarkId::from_parameter(pool_count),
            &market,
            |b, market| b.iter(|| evaluator.evaluate(black_box(market), "T0")),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build_market,
    bench_find_negative_cycle,
    bench_evaluate
);
criterion_main!(benches);
