//! Contact graph benchmarks — build + infection queries.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use contagion_graph::{CommunicationEvent, GraphBuilder, InfectionQuery};

/// Deterministic pseudo-random events over `entities` ids and `span` timestamps.
fn generate_events(count: usize, entities: i64, span: i64) -> Vec<CommunicationEvent> {
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    (0..count)
        .map(|_| {
            let a = (next() % entities as u64) as i64;
            let b = (next() % entities as u64) as i64;
            let t = (next() % span as u64) as i64;
            CommunicationEvent::new(a, b, t)
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("contact_graph_build");
    for &count in &[1_000usize, 10_000, 100_000] {
        let events = generate_events(count, (count / 10) as i64, (count / 4) as i64);
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| {
                let mut builder = GraphBuilder::new();
                builder.record_all(events.iter().copied());
                black_box(builder.build())
            })
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let events = generate_events(100_000, 10_000, 25_000);
    let mut builder = GraphBuilder::new();
    builder.record_all(events);
    let graph = builder.build();

    c.bench_function("infection_query_single", |b| {
        b.iter(|| black_box(graph.query(black_box(17), black_box(9_001), 0, 25_000)))
    });

    let queries: Vec<InfectionQuery> = (0..256)
        .map(|i| InfectionQuery::new(i * 37 % 10_000, i * 91 % 10_000, i, 25_000))
        .collect();
    c.bench_function("infection_query_batch_256", |b| {
        b.iter(|| black_box(graph.query_batch(&queries)))
    });
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
