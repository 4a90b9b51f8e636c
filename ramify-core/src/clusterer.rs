//! One-shot clustering entry point.

use tracing::instrument;

use crate::{
    Result, agglomerator::Agglomerator, linkage::Linkage, node::Dendrogram,
};

/// Runs a complete clustering pass: validate, copy, merge n−1 times, and
/// hand back the dendrogram.
///
/// A `Clusterer` holds only its configuration; independent instances (or the
/// same instance from one thread at a time per call) may cluster different
/// matrices concurrently, since every run works on private state.
///
/// # Examples
/// ```
/// use ramify_core::{ClustererBuilder, Linkage, depth_first_leaf_order};
///
/// let matrix = vec![
///     vec![0.0, 2.0, 6.0],
///     vec![2.0, 0.0, 4.0],
///     vec![6.0, 4.0, 0.0],
/// ];
/// let clusterer = ClustererBuilder::new()
///     .with_linkage(Linkage::Average)
///     .build();
/// let dendrogram = clusterer.cluster(&matrix, &["x", "y", "z"])?;
/// assert_eq!(dendrogram.leaf_count(), 3);
/// assert_eq!(depth_first_leaf_order(dendrogram.root()).len(), 3);
/// # Ok::<(), ramify_core::ClusterError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Clusterer {
    linkage: Linkage,
}

impl Clusterer {
    pub(crate) const fn new(linkage: Linkage) -> Self {
        Self { linkage }
    }

    /// Returns the configured linkage.
    #[must_use]
    pub const fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Clusters the matrix and returns the dendrogram.
    ///
    /// The engine copies the matrix before the first merge; the caller's
    /// rows are never written to.
    ///
    /// # Errors
    /// Returns [`ClusterError::EmptyMatrix`],
    /// [`ClusterError::NonSquareMatrix`], [`ClusterError::InvalidDistance`],
    /// or [`ClusterError::LabelCountMismatch`] when the inputs are
    /// malformed. Validation precedes any mutation.
    #[instrument(
        name = "clusterer.cluster",
        err,
        skip(self, matrix, labels),
        fields(items = matrix.len(), linkage = %self.linkage),
    )]
    pub fn cluster(
        &self,
        matrix: &[Vec<f64>],
        labels: &[impl AsRef<str>],
    ) -> Result<Dendrogram> {
        Agglomerator::new(matrix, labels, self.linkage)?.finish()
    }

    /// Clusters the matrix, consulting `keep_going` between merges.
    ///
    /// # Errors
    /// As [`Self::cluster`], plus [`ClusterError::Cancelled`] when
    /// `keep_going` returns `false`.
    pub fn cluster_until(
        &self,
        matrix: &[Vec<f64>],
        labels: &[impl AsRef<str>],
        keep_going: impl FnMut() -> bool,
    ) -> Result<Dendrogram> {
        Agglomerator::new(matrix, labels, self.linkage)?.finish_until(keep_going)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ClusterError, ClustererBuilder, Linkage};

    #[test]
    fn cluster_until_surfaces_cancellation() {
        let matrix = vec![
            vec![0.0, 1.0, 4.0],
            vec![1.0, 0.0, 2.0],
            vec![4.0, 2.0, 0.0],
        ];
        let clusterer = ClustererBuilder::new()
            .with_linkage(Linkage::Single)
            .build();
        let err = clusterer
            .cluster_until(&matrix, &["a", "b", "c"], || false)
            .expect_err("the check refuses immediately");
        assert_eq!(err, ClusterError::Cancelled { completed: 0 });
    }
}
