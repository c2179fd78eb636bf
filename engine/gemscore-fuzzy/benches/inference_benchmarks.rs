//! Benchmarks for the employability inference engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gemscore_fuzzy::{EmployabilityScorer, InferenceEngine, InferenceRequest};

/// Deterministic spread of indicator scores across the universe
fn generate_requests(size: usize) -> Vec<InferenceRequest> {
    (0..size)
        .map(|i| {
            let base = (i * 37 % 101) as f64;
            InferenceRequest::new(
                base,
                (base * 1.3) % 100.0,
                (i * 13 % 101) as f64,
                (i * 7 % 101) as f64,
                100.0 - base,
            )
        })
        .collect()
}

fn bench_single_inference(c: &mut Criterion) {
    let engine = InferenceEngine::new();
    let request = InferenceRequest::new(82.5, 67.0, 31.2, 58.9, 91.4);

    c.bench_function("infer_single", |b| {
        b.iter(|| engine.infer(black_box(&request)))
    });

    c.bench_function("explain_single", |b| {
        b.iter(|| engine.explain(black_box(&request)))
    });
}

fn bench_batch_scoring(c: &mut Criterion) {
    let scorer = EmployabilityScorer::new();
    let mut group = c.benchmark_group("score_batch");

    for size in [100, 1_000, 5_000] {
        let requests = generate_requests(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &requests, |b, requests| {
            b.iter(|| {
                requests
                    .iter()
                    .filter_map(|r| scorer.score(r).ok())
                    .count()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_inference, bench_batch_scoring);
criterion_main!(benches);
