//! Pipeline benchmarks for mek_core.
//!
//! Run with: `cargo bench -p mek_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mek_core::registry::HandlerRegistry;
use mek_test_utils::fixtures::all_fixtures;

/// Full parse, validate and score pass over one fixture per kind.
pub fn pipeline_benchmark(c: &mut Criterion) {
    let registry = HandlerRegistry::standard();
    let docs = all_fixtures();

    c.bench_function("process_all_kinds", |b| {
        b.iter(|| {
            for doc in &docs {
                black_box(registry.process(black_box(doc)));
            }
        });
    });

    c.bench_function("serialize_all_kinds", |b| {
        let units: Vec<_> = docs
            .iter()
            .filter_map(|doc| registry.process(doc).unit)
            .collect();
        b.iter(|| {
            for unit in &units {
                black_box(registry.serialize(unit).ok());
            }
        });
    });
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
