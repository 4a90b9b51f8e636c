//! Full-dendrogram clustering benchmarks.
//!
//! Measures `Clusterer::cluster` end to end (validation, matrix copy, and
//! the O(n^3) merge loop) over seeded synthetic matrices, for each linkage
//! strategy. The merge loop dominates; the per-linkage spread shows how much
//! of the cost is the closest-pair scan versus the distance update formula.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use ramify_benches::SyntheticMatrix;
use ramify_core::{ClustererBuilder, Linkage};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Matrix sizes to benchmark.
const POINT_COUNTS: &[usize] = &[50, 100, 200];

fn cluster_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster");
    group.sample_size(20);

    for &point_count in POINT_COUNTS {
        let fixture = SyntheticMatrix::generate(point_count, SEED);

        for linkage in [Linkage::Average, Linkage::Complete, Linkage::Single] {
            let clusterer = ClustererBuilder::new().with_linkage(linkage).build();
            group.bench_with_input(
                BenchmarkId::new(linkage.name(), point_count),
                &fixture,
                |b, fixture| {
                    b.iter(|| {
                        clusterer
                            .cluster(&fixture.matrix, &fixture.labels)
                            .expect("synthetic matrices are valid")
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, cluster_benchmarks);
criterion_main!(benches);
