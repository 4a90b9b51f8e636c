//! The merge loop: n leaf clusters folded into one root by n−1 merges.
//!
//! [`Agglomerator`] is the step-wise surface: a host that wants a progress
//! dialog (or a cancel button) drives [`Agglomerator::step`] itself, or hands
//! a cancellation check to [`Agglomerator::finish_until`]. The one-shot path
//! is [`crate::Clusterer::cluster`].
//!
//! An agglomerator is one-shot: it validates and copies its inputs up front,
//! mutates only that private state, and is consumed when the dendrogram is
//! extracted. The caller's matrix is never written to.

use tracing::{instrument, warn};

use crate::{
    error::{ClusterError, Result},
    linkage::Linkage,
    node::Dendrogram,
    table::ClusterTable,
};

pub use crate::table::MergeStep;

/// Where a run currently stands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Inputs validated, no merge performed yet.
    Initialized,
    /// At least one merge performed, more than one cluster still active.
    Running,
    /// Exactly one cluster remains; the dendrogram can be extracted.
    Completed,
}

/// Drives the agglomerative merge loop over a private copy of the inputs.
///
/// # Examples
/// ```
/// use ramify_core::{Agglomerator, Linkage, Phase};
///
/// let matrix = vec![
///     vec![0.0, 1.0, 4.0],
///     vec![1.0, 0.0, 2.0],
///     vec![4.0, 2.0, 0.0],
/// ];
/// let mut agglomerator =
///     Agglomerator::new(&matrix, &["a", "b", "c"], Linkage::Single)?;
/// assert_eq!(agglomerator.phase(), Phase::Initialized);
///
/// let first = agglomerator.step()?;
/// assert_eq!(first.distance, 1.0);
///
/// let dendrogram = agglomerator.finish()?;
/// assert_eq!(dendrogram.leaf_count(), 3);
/// # Ok::<(), ramify_core::ClusterError>(())
/// ```
#[derive(Debug)]
pub struct Agglomerator {
    table: ClusterTable,
    linkage: Linkage,
    completed_merges: usize,
}

impl Agglomerator {
    /// Validates the inputs and builds the initial leaf clusters.
    ///
    /// A single-row matrix is valid: the run is already complete and
    /// [`Self::finish`] returns the lone leaf unmerged.
    ///
    /// # Errors
    /// Returns [`ClusterError::EmptyMatrix`] for a zero-row matrix,
    /// [`ClusterError::NonSquareMatrix`] / [`ClusterError::InvalidDistance`]
    /// for a malformed one, and [`ClusterError::LabelCountMismatch`] when the
    /// label array does not match the matrix dimension. Nothing is mutated
    /// on failure.
    pub fn new(matrix: &[Vec<f64>], labels: &[impl AsRef<str>], linkage: Linkage) -> Result<Self> {
        let table = ClusterTable::new(matrix, labels)?;
        Ok(Self {
            table,
            linkage,
            completed_merges: 0,
        })
    }

    /// Returns the configured linkage.
    #[must_use]
    pub const fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Returns the current phase of the state machine.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.table.active_count() <= 1 {
            Phase::Completed
        } else if self.completed_merges == 0 {
            Phase::Initialized
        } else {
            Phase::Running
        }
    }

    /// Number of clusters still active.
    #[must_use]
    pub const fn active_clusters(&self) -> usize {
        self.table.active_count()
    }

    /// Merges completed so far.
    #[must_use]
    pub const fn completed_merges(&self) -> usize {
        self.completed_merges
    }

    /// Performs one closest-pair search plus merge.
    ///
    /// # Errors
    /// Returns [`ClusterError::ExhaustedClusters`] when fewer than two
    /// clusters remain active.
    pub fn step(&mut self) -> Result<MergeStep> {
        let Some(pair) = self.table.closest_pair() else {
            return Err(ClusterError::ExhaustedClusters {
                active: self.table.active_count(),
            });
        };
        let step = self.table.merge(pair, self.linkage);
        self.completed_merges += 1;
        Ok(step)
    }

    /// Runs the remaining merges and extracts the dendrogram.
    ///
    /// # Errors
    /// Propagates any [`ClusterError`] raised by the merge loop.
    pub fn finish(self) -> Result<Dendrogram> {
        self.finish_until(|| true)
    }

    /// Runs the remaining merges, consulting `keep_going` between steps.
    ///
    /// The check is called before every merge; returning `false` aborts the
    /// run. This is the cooperative cancellation point for hosts clustering
    /// very large matrices on a worker thread.
    ///
    /// # Errors
    /// Returns [`ClusterError::Cancelled`] when `keep_going` returns `false`,
    /// with the number of merges completed across the agglomerator's whole
    /// lifetime.
    #[instrument(
        name = "agglomerator.finish",
        err,
        skip(self, keep_going),
        fields(active = self.table.active_count(), linkage = %self.linkage),
    )]
    pub fn finish_until(mut self, mut keep_going: impl FnMut() -> bool) -> Result<Dendrogram> {
        while self.table.active_count() > 1 {
            if !keep_going() {
                warn!(
                    completed = self.completed_merges,
                    active = self.table.active_count(),
                    "clustering cancelled by caller"
                );
                return Err(ClusterError::Cancelled {
                    completed: self.completed_merges,
                });
            }
            self.step()?;
        }

        // The merge loop leaves exactly one active slot holding the root;
        // an empty table here would mean corrupted slot state, which is
        // propagated as an error rather than a panic.
        self.table
            .take_root()
            .map(Dendrogram::new)
            .ok_or_else(|| ClusterError::ExhaustedClusters {
                active: self.table.active_count(),
            })
    }
}
