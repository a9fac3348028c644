//! Benchmark suite for criteria normalization.
//!
//! Benchmarks cover:
//! - Flat clauses with an `id` remap
//! - Deeply nested and/or/nor trees
//! - Wide `or` lists (typical of IN-style lookups by record id)
//! - Structural analysis
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use critnorm::criteria::{analyze_criteria, normalize, Schema};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Criteria inputs organized by shape
// ---------------------------------------------------------------------------

fn flat_criteria() -> Value {
    json!({
        "where": {"id": "#12:0", "name": {"like": "a%"}, "age": {">": 18}},
        "limit": 10,
        "skip": 0,
        "sort": {"name": 1}
    })
}

fn nested_criteria(depth: usize) -> Value {
    let mut clause = json!({"id": 1, "x": 2});
    for level in 0..depth {
        let key = ["or", "and", "nor"][level % 3];
        clause = json!({ key: [clause, {"level": level}] });
    }
    json!({ "where": clause, "limit": 1 })
}

fn wide_criteria(width: usize) -> Value {
    let clauses: Vec<Value> = (0..width)
        .map(|i| json!({"id": format!("#12:{i}")}))
        .collect();
    json!({ "where": {"or": clauses} })
}

// ---------------------------------------------------------------------------
// Benchmark groups
// ---------------------------------------------------------------------------

fn bench_normalize(c: &mut Criterion) {
    let schema = Schema::default();
    let mut group = c.benchmark_group("normalize");

    group.bench_function("flat", |b| {
        let input = flat_criteria();
        b.iter(|| normalize(black_box(input.clone()), &schema).unwrap());
    });

    for depth in [4, 16, 64] {
        let input = nested_criteria(depth);
        group.bench_with_input(BenchmarkId::new("nested", depth), &input, |b, input| {
            b.iter(|| normalize(black_box(input.clone()), &schema).unwrap());
        });
    }

    for width in [10, 100, 1000] {
        let input = wide_criteria(width);
        group.bench_with_input(BenchmarkId::new("wide_or", width), &input, |b, input| {
            b.iter(|| normalize(black_box(input.clone()), &schema).unwrap());
        });
    }

    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let schema = Schema::from_value(json!({"name": "string", "age": "integer"}))
        .unwrap_or_default();
    let mut group = c.benchmark_group("analysis");

    let cases = [
        ("flat", flat_criteria()),
        ("nested_16", nested_criteria(16)),
        ("wide_or_100", wide_criteria(100)),
    ];

    for (name, input) in &cases {
        group.bench_with_input(BenchmarkId::new("analyze", name), input, |b, input| {
            b.iter(|| analyze_criteria(black_box(input), &schema));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_analysis);
criterion_main!(benches);
