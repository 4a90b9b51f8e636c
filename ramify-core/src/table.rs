//! Mutable cluster bookkeeping for one clustering run.
//!
//! Each input row starts as an active slot wrapping a leaf node. A merge
//! retires one slot and folds it into the other; an explicit `active` flag
//! tags retirement instead of the legacy sentinel-value trick of marking
//! retired matrix rows with a magic negative distance.

use tracing::{debug, warn};

use crate::{
    error::{ClusterError, Result},
    linkage::Linkage,
    matrix::SquareMatrix,
    node::ClusterNode,
};

/// One cluster slot. `node` is `Some` while the slot is active and is taken
/// when the slot is retired or when the root is extracted.
#[derive(Debug)]
struct Slot {
    leaf_count: usize,
    join_distance: f64,
    active: bool,
    node: Option<ClusterNode>,
}

/// The globally closest active pair, as found by the row-major scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ClosestPair {
    pub(crate) row: usize,
    pub(crate) col: usize,
    pub(crate) distance: f64,
}

/// Record of one completed merge.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeStep {
    /// Slot id that was deactivated by the merge.
    pub retired: usize,
    /// Slot id that now holds the merged cluster.
    pub kept: usize,
    /// Distance at which the two clusters were joined.
    pub distance: f64,
}

/// Working state: slots plus the private working copy of the matrix.
#[derive(Debug)]
pub(crate) struct ClusterTable {
    slots: Vec<Slot>,
    distances: SquareMatrix,
    active: usize,
}

impl ClusterTable {
    /// Validates the inputs and creates `n` active leaf slots.
    ///
    /// Fails fast: every validation error is raised before any slot or the
    /// working matrix copy is built.
    pub(crate) fn new(matrix: &[Vec<f64>], labels: &[impl AsRef<str>]) -> Result<Self> {
        if matrix.is_empty() {
            warn!("distance matrix is empty, returning error");
            return Err(ClusterError::EmptyMatrix);
        }
        if labels.len() != matrix.len() {
            return Err(ClusterError::LabelCountMismatch {
                labels: labels.len(),
                size: matrix.len(),
            });
        }
        let distances = SquareMatrix::from_rows(matrix)?;

        let slots = labels
            .iter()
            .map(|label| Slot {
                leaf_count: 1,
                join_distance: 0.0,
                active: true,
                node: Some(ClusterNode::leaf(label.as_ref())),
            })
            .collect::<Vec<_>>();
        let active = distances.size();

        Ok(Self {
            slots,
            distances,
            active,
        })
    }

    /// Number of slots still active.
    pub(crate) const fn active_count(&self) -> usize {
        self.active
    }

    /// Finds the globally closest active pair.
    ///
    /// Scans pairs `(i, j)` with `i > j`, `i` ascending outer and `j`
    /// ascending inner. The strict `<` comparison makes the first pair
    /// encountered win ties; reproducible merge orders depend on this exact
    /// scan, so it must not be reordered.
    pub(crate) fn closest_pair(&self) -> Option<ClosestPair> {
        let mut best: Option<ClosestPair> = None;
        for row in 1..self.slots.len() {
            if !self.slots[row].active {
                continue;
            }
            for col in 0..row {
                if !self.slots[col].active {
                    continue;
                }
                let distance = self.distances.get(row, col);
                if best.is_none_or(|b| distance < b.distance) {
                    best = Some(ClosestPair {
                        row,
                        col,
                        distance,
                    });
                }
            }
        }
        best
    }

    /// Merges the pair, retiring one slot and folding it into the other.
    ///
    /// The slot with the larger leaf count is kept; on equal counts the slot
    /// with the smaller id is kept. Each child's branch length is the merge
    /// distance minus the child's own join distance, unclamped.
    pub(crate) fn merge(&mut self, pair: ClosestPair, linkage: Linkage) -> MergeStep {
        let ClosestPair { row, col, distance } = pair;
        let (kept, retired) = if self.slots[row].leaf_count > self.slots[col].leaf_count {
            (row, col)
        } else if self.slots[col].leaf_count > self.slots[row].leaf_count {
            (col, row)
        } else {
            (row.min(col), row.max(col))
        };

        let kept_leaves = self.slots[kept].leaf_count;
        let retired_leaves = self.slots[retired].leaf_count;
        for third in 0..self.slots.len() {
            if third == kept || third == retired || !self.slots[third].active {
                continue;
            }
            let merged = linkage.merged_distance(
                self.distances.get(kept, third),
                self.distances.get(retired, third),
                kept_leaves,
                retired_leaves,
            );
            self.distances.set(kept, third, merged);
        }

        let retired_branch = distance - self.slots[retired].join_distance;
        let kept_branch = distance - self.slots[kept].join_distance;
        if retired_branch < 0.0 || kept_branch < 0.0 {
            // Expected for non-ultrametric linkages; reported, never clamped.
            debug!(
                kept,
                retired,
                retired_branch,
                kept_branch,
                merge_distance = distance,
                "negative branch length"
            );
        }

        // Both slots are active, so both nodes are present and the zip
        // always yields the merged node; the Option flows through rather
        // than panicking, and a violated invariant would surface as a
        // missing root when the run finishes.
        let retired_node = self.slots[retired].node.take();
        let kept_node = self.slots[kept].node.take();
        self.slots[kept].node = retired_node.zip(kept_node).map(|(former, survivor)| {
            ClusterNode::joined(former, retired_branch, survivor, kept_branch)
        });

        self.slots[retired].active = false;
        self.slots[kept].leaf_count = kept_leaves + retired_leaves;
        self.slots[kept].join_distance = distance;
        self.active -= 1;

        debug!(
            kept,
            retired,
            merge_distance = distance,
            leaves = self.slots[kept].leaf_count,
            active = self.active,
            "merged clusters"
        );

        MergeStep {
            retired,
            kept,
            distance,
        }
    }

    /// Takes the single remaining cluster's node, once exactly one slot is
    /// still active.
    pub(crate) fn take_root(&mut self) -> Option<ClusterNode> {
        if self.active != 1 {
            return None;
        }
        self.slots
            .iter_mut()
            .find(|slot| slot.active)
            .and_then(|slot| slot.node.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(matrix: &[Vec<f64>], labels: &[&str]) -> ClusterTable {
        ClusterTable::new(matrix, labels).expect("inputs are valid")
    }

    fn three_point_matrix() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 1.0, 4.0],
            vec![1.0, 0.0, 2.0],
            vec![4.0, 2.0, 0.0],
        ]
    }

    #[test]
    fn closest_pair_scans_row_major_lower_triangle() {
        let matrix = three_point_matrix();
        let found = table(&matrix, &["a", "b", "c"])
            .closest_pair()
            .expect("three active slots");
        assert_eq!(
            found,
            ClosestPair {
                row: 1,
                col: 0,
                distance: 1.0,
            }
        );
    }

    #[test]
    fn ties_resolve_to_the_first_pair_encountered() {
        // (1, 0) and (2, 0) carry the same distance; the scan meets (1, 0)
        // first.
        let matrix = vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 5.0],
            vec![1.0, 5.0, 0.0],
        ];
        let found = table(&matrix, &["a", "b", "c"])
            .closest_pair()
            .expect("three active slots");
        assert_eq!((found.row, found.col), (1, 0));
    }

    #[test]
    fn equal_leaf_counts_keep_the_smaller_slot_id() {
        let matrix = three_point_matrix();
        let mut t = table(&matrix, &["a", "b", "c"]);
        let pair = t.closest_pair().expect("three active slots");
        let step = t.merge(pair, Linkage::Single);
        assert_eq!(step.kept, 0);
        assert_eq!(step.retired, 1);
        assert_eq!(step.distance, 1.0);
        assert_eq!(t.active_count(), 2);
    }

    #[test]
    fn larger_cluster_is_kept_regardless_of_slot_order() {
        let matrix = three_point_matrix();
        let mut t = table(&matrix, &["a", "b", "c"]);
        let first = t.closest_pair().expect("three active slots");
        t.merge(first, Linkage::Single);

        // Slot 0 now holds two leaves; slot 2 holds one. Even though the
        // pair is reported as (row=2, col=0), slot 0 must be kept.
        let second = t.closest_pair().expect("two active slots");
        assert_eq!((second.row, second.col), (2, 0));
        let step = t.merge(second, Linkage::Single);
        assert_eq!(step.kept, 0);
        assert_eq!(step.retired, 2);
    }

    #[test]
    fn merge_updates_distances_via_the_linkage() {
        let matrix = three_point_matrix();
        let mut t = table(&matrix, &["a", "b", "c"]);
        let pair = t.closest_pair().expect("three active slots");
        t.merge(pair, Linkage::Single);

        // d(merged, c) = min(d(a, c), d(b, c)) = min(4, 2) = 2.
        let next = t.closest_pair().expect("two active slots");
        assert_eq!(next.distance, 2.0);
    }

    #[test]
    fn negative_branch_lengths_pass_through_unclamped() {
        // Merging a non-minimal pair first drives the merged cluster's join
        // distance above the next merge distance, so the second merge hands
        // the kept child a negative branch. The value must flow into the
        // tree untouched.
        let matrix = vec![
            vec![0.0, 5.0, 1.0],
            vec![5.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ];
        let mut t = table(&matrix, &["a", "b", "c"]);
        t.merge(
            ClosestPair {
                row: 1,
                col: 0,
                distance: 5.0,
            },
            Linkage::Single,
        );

        // d(merged, c) = min(1, 1) = 1, below the join distance 5.
        let next = t.closest_pair().expect("two active slots");
        assert_eq!(next.distance, 1.0);
        let step = t.merge(next, Linkage::Single);
        assert_eq!(step.kept, 0);

        let root = t.take_root().expect("one active slot remains");
        let children = root.children().expect("root is internal");
        assert_eq!(children[0].branch_length(), 1.0);
        assert_eq!(children[1].branch_length(), -4.0);
    }

    #[test]
    fn take_root_requires_a_single_active_slot() {
        let matrix = three_point_matrix();
        let mut t = table(&matrix, &["a", "b", "c"]);
        assert!(t.take_root().is_none());

        let first = t.closest_pair().expect("pair");
        t.merge(first, Linkage::Average);
        let second = t.closest_pair().expect("pair");
        t.merge(second, Linkage::Average);

        let root = t.take_root().expect("one active slot remains");
        assert_eq!(root.leaf_count(), 3);
    }

    #[test]
    fn validation_rejects_label_count_mismatch() {
        let matrix = three_point_matrix();
        let err = ClusterTable::new(&matrix, &["a", "b"]).expect_err("two labels for three rows");
        assert_eq!(
            err,
            ClusterError::LabelCountMismatch {
                labels: 2,
                size: 3,
            }
        );
    }

    #[test]
    fn validation_rejects_empty_matrices() {
        let matrix: Vec<Vec<f64>> = Vec::new();
        let labels: Vec<&str> = Vec::new();
        let err = ClusterTable::new(&matrix, &labels).expect_err("empty matrix");
        assert_eq!(err, ClusterError::EmptyMatrix);
    }
}
