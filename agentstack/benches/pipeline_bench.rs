//! Benchmarks for pipeline execution.

use agentstack::events::NoOpLogSink;
use agentstack::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

fn stage_benchmark(c: &mut Criterion) {
    let optimizer = OptimizerStage::new(true);
    let summarizer = SummarizerStage::new(100);
    let long = "The quick brown fox jumps over the lazy dog. ".repeat(50);

    c.bench_function("optimize", |b| {
        b.iter(|| optimizer.optimize(black_box("Hello   world.\n\n\tagain  ")))
    });
    c.bench_function("summarize_long", |b| {
        b.iter(|| summarizer.summarize(black_box(&long)))
    });
}

fn pipeline_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let orchestrator = Orchestrator::builder(Settings::default())
        .with_sink(Arc::new(NoOpLogSink))
        .build()
        .unwrap();

    c.bench_function("full_run", |b| {
        b.iter(|| {
            runtime
                .block_on(orchestrator.run(black_box("Benchmark   content\nfor the pipeline"), None))
                .unwrap()
        })
    });
}

criterion_group!(benches, stage_benchmark, pipeline_benchmark);
criterion_main!(benches);
