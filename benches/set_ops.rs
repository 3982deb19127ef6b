//! Set operation benchmarks.
//!
//! Run with:
//! ```bash
//! cargo bench --bench set_ops
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rangeset_rs::domain::Integer;
use rangeset_rs::interval::Interval;
use rangeset_rs::set::Set;
use rangeset_rs::sql::{SqlConfig, StandardQuoter};

// ============================================================================
// Helper: random sets of scattered intervals
// ============================================================================

fn random_set(rng: &mut ChaCha8Rng, intervals: usize) -> Set<Integer> {
    let span = (intervals as i64) * 20;
    Set::from_intervals((0..intervals).map(|_| {
        let low = rng.gen_range(0..span);
        Interval::new::<Integer>(Some(low), Some(low + rng.gen_range(0..10)))
    }))
    .unwrap()
}

const SIZES: [usize; 4] = [10, 100, 1_000, 10_000];

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    for size in SIZES {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let a = random_set(&mut rng, size);
        let b = random_set(&mut rng, size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| {
                let mut set = a.clone();
                set.add([&b]).unwrap();
                black_box(set)
            })
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    for size in SIZES {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let a = random_set(&mut rng, size);
        let b = random_set(&mut rng, size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| black_box(a.difference(&b).unwrap()))
        });
    }
    group.finish();
}

fn bench_invert(c: &mut Criterion) {
    let mut group = c.benchmark_group("invert");
    for size in SIZES {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let a = random_set(&mut rng, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| {
                let mut set = a.clone();
                set.invert().unwrap();
                black_box(set)
            })
        });
    }
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    for size in SIZES {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let text = random_set(&mut rng, size).to_string();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", size), &text, |bench, text| {
            bench.iter(|| black_box(Set::<Integer>::parse(text).unwrap()))
        });
    }
    group.finish();
}

fn bench_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql");
    for size in SIZES {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let set = random_set(&mut rng, size).with_identifier("x");
        group.bench_with_input(BenchmarkId::new("inline", size), &set, |bench, set| {
            bench.iter(|| black_box(set.to_sql(&StandardQuoter).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("params", size), &set, |bench, set| {
            bench.iter(|| black_box(set.to_sql_with_params(&SqlConfig::default()).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_add, bench_remove, bench_invert, bench_codec, bench_sql);
criterion_main!(benches);
