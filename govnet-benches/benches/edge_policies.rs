//! Benchmarks for candidate expansion and weight aggregation.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use govnet_benches::{synthetic_roster, synthetic_votes};
use govnet_core::{EdgeAccumulator, EdgeOrientation, NetworkBuilder, RelationPolicy};

fn aligned_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("co_vote_aligned");
    let roster = synthetic_roster(256);
    for cohort in [8_usize, 32, 128] {
        let records = synthetic_votes(256, 16, cohort, 42);
        let network = NetworkBuilder::new()
            .with_policy(RelationPolicy::CoVoteAligned)
            .build()
            .expect("valid configuration");
        group.throughput(Throughput::Elements((cohort * cohort) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(cohort), &cohort, |b, _| {
            b.iter(|| network.run(&roster, &records).expect("run must succeed"));
        });
    }
    group.finish();
}

fn opposed_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("co_vote_opposed");
    let roster = synthetic_roster(256);
    for cohort in [8_usize, 32, 128] {
        let records = synthetic_votes(256, 16, cohort, 42);
        let network = NetworkBuilder::new()
            .with_policy(RelationPolicy::CoVoteOpposed)
            .build()
            .expect("valid configuration");
        group.throughput(Throughput::Elements((cohort * cohort) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(cohort), &cohort, |b, _| {
            b.iter(|| network.run(&roster, &records).expect("run must succeed"));
        });
    }
    group.finish();
}

fn accumulator_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_accumulator");
    for pairs in [1_000_usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(pairs as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pairs), &pairs, |b, &pairs| {
            b.iter(|| {
                let mut acc = EdgeAccumulator::new(EdgeOrientation::Undirected);
                for i in 0..pairs {
                    acc.record(i % 97, (i * 31) % 89 + 100);
                }
                acc.into_edges()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, aligned_expansion, opposed_expansion, accumulator_merge);
criterion_main!(benches);
