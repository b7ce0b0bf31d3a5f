//! Benchmarks for traverser-set folding and path operations.
//!
//! Run with: `cargo bench`

#![allow(missing_docs)]

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wayline::{MutablePath, Path, SideEffects, Traverser, TraverserSet, Value};

/// Benchmark folding `n` traversers over a small distinct-value domain, the
/// shape barrier steps see on dense graphs.
fn bench_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("traverser_set_fold");
    let side_effects = Arc::new(SideEffects::new());

    for n in [1_000usize, 10_000, 100_000] {
        let traversers: Vec<Traverser> = (0..n)
            .map(|i| Traverser::new(Value::Int((i % 100) as i64), &side_effects))
            .collect();

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| {
                let mut set = TraverserSet::new();
                for traverser in traversers.iter().cloned() {
                    set.add(traverser);
                }
                black_box(set.size())
            });
        });
    }

    group.finish();
}

/// Benchmark folding when every traverser is distinct, the worst case where
/// the set degenerates into a plain ordered collection.
fn bench_fold_distinct(c: &mut Criterion) {
    let mut group = c.benchmark_group("traverser_set_fold_distinct");
    let side_effects = Arc::new(SideEffects::new());

    for n in [1_000usize, 10_000] {
        let traversers: Vec<Traverser> = (0..n)
            .map(|i| Traverser::new(Value::Int(i as i64), &side_effects))
            .collect();

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| {
                let mut set = TraverserSet::new();
                for traverser in traversers.iter().cloned() {
                    set.add(traverser);
                }
                black_box(set.size())
            });
        });
    }

    group.finish();
}

/// Benchmark path extension and hashing at traversal-typical depths.
fn bench_path_extend(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_extend_and_hash");

    for depth in [4usize, 16, 64] {
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |bench, _| {
            bench.iter(|| {
                let mut path = MutablePath::new();
                for i in 0..depth {
                    path.extend(Value::Int(i as i64), vec![format!("s{}", i % 4)]);
                }
                black_box(path.hash_path())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fold, bench_fold_distinct, bench_path_extend);
criterion_main!(benches);
