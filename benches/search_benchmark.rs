//! Benchmark for the sampled grouping search
//!
//! Run with: cargo bench --bench search_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;

use eqsplit::pipeline::{create_groups, GroupingConfig, Statistic};

/// Synthetic frame with deterministic pseudo-random criteria
fn generate_frame(n_rows: usize) -> DataFrame {
    // Simple LCG keeps the fixture reproducible without an RNG dependency
    let mut state = 0x2545f4914f6cdd1du64;
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    let a: Vec<f64> = (0..n_rows).map(|_| next() * 100.0).collect();
    let b: Vec<f64> = (0..n_rows).map(|_| next() * next() * 50.0).collect();
    let site: Vec<&str> = (0..n_rows).map(|i| if i % 2 == 0 { "a" } else { "b" }).collect();

    df! {
        "a" => a,
        "b" => b,
        "site" => site,
    }
    .unwrap()
}

fn bench_sampled_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampled_search");

    for &n_rows in &[100usize, 1000] {
        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_rows),
            &n_rows,
            |bench, &n_rows| {
                let frame = generate_frame(n_rows);
                let config = GroupingConfig {
                    criteria: vec!["a".to_string(), "b".to_string()],
                    n_iter: 200,
                    seed: Some(1),
                    ..GroupingConfig::default()
                };
                bench.iter(|| {
                    let mut df = frame.clone();
                    black_box(create_groups(&mut df, &config).unwrap())
                })
            },
        );
    }

    group.finish();
}

fn bench_constrained_search(c: &mut Criterion) {
    let frame = generate_frame(500);
    let config = GroupingConfig {
        criteria: vec!["a".to_string()],
        criteria_nominal: vec!["site".to_string()],
        nominal_tolerance: vec![1],
        n_iter: 200,
        statistics: vec![Statistic::Mean, Statistic::Variance],
        seed: Some(1),
        ..GroupingConfig::default()
    };

    c.bench_function("constrained_search_n500", |b| {
        b.iter(|| {
            let mut df = frame.clone();
            black_box(create_groups(&mut df, &config).unwrap())
        })
    });
}

criterion_group!(benches, bench_sampled_search, bench_constrained_search);
criterion_main!(benches);
