//! Shared fixtures for the Ramify benchmarks.
//!
//! Benchmarks need matrices whose shape is realistic (symmetric, zero
//! diagonal, Euclidean) but whose content is reproducible across runs, so
//! the generator derives everything from a fixed seed.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// A seeded synthetic distance matrix with generated row labels.
#[derive(Debug, Clone)]
pub struct SyntheticMatrix {
    /// Pairwise Euclidean distances between the generated points.
    pub matrix: Vec<Vec<f64>>,
    /// One label per row, `point0..pointN`.
    pub labels: Vec<String>,
}

impl SyntheticMatrix {
    /// Generates `point_count` points uniformly in a 2D square and takes
    /// their pairwise Euclidean distances.
    #[must_use]
    pub fn generate(point_count: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let points: Vec<(f64, f64)> = (0..point_count)
            .map(|_| (rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
            .collect();

        let mut matrix = vec![vec![0.0; point_count]; point_count];
        for i in 1..point_count {
            for j in 0..i {
                let dx = points[i].0 - points[j].0;
                let dy = points[i].1 - points[j].1;
                let distance = (dx * dx + dy * dy).sqrt();
                matrix[i][j] = distance;
                matrix[j][i] = distance;
            }
        }

        let labels = (0..point_count).map(|i| format!("point{i}")).collect();
        Self { matrix, labels }
    }
}
