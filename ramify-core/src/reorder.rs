//! Canonical leaf ordering and heat-map matrix permutation.
//!
//! The viewer draws the heat map next to the dendrogram, so the matrix rows
//! must follow the same order as the drawn leaves. The canonical order is a
//! pre-order walk of the tree visiting children in their stored
//! `[retired, kept]` merge order; it is deterministic because the tree's
//! child order is.

use std::collections::HashMap;

use crate::{
    error::{ClusterError, Result},
    node::ClusterNode,
};

/// Collects leaf labels in depth-first pre-order.
///
/// The result has one entry per leaf and is a permutation of the labels the
/// tree was built from.
///
/// # Examples
/// ```
/// use ramify_core::{ClustererBuilder, Linkage, depth_first_leaf_order};
///
/// let matrix = vec![
///     vec![0.0, 1.0, 4.0],
///     vec![1.0, 0.0, 2.0],
///     vec![4.0, 2.0, 0.0],
/// ];
/// let dendrogram = ClustererBuilder::new()
///     .with_linkage(Linkage::Single)
///     .build()
///     .cluster(&matrix, &["a", "b", "c"])?;
/// let order = depth_first_leaf_order(dendrogram.root());
/// assert_eq!(order.len(), 3);
/// # Ok::<(), ramify_core::ClusterError>(())
/// ```
#[must_use]
pub fn depth_first_leaf_order(root: &ClusterNode) -> Vec<String> {
    let mut order = Vec::with_capacity(root.leaf_count());
    collect_leaves(root, &mut order);
    order
}

fn collect_leaves(node: &ClusterNode, order: &mut Vec<String>) {
    match node {
        ClusterNode::Leaf { label, .. } => order.push(label.clone()),
        ClusterNode::Internal { children, .. } => {
            collect_leaves(&children[0], order);
            collect_leaves(&children[1], order);
        }
    }
}

/// Permutes `matrix` so its rows and columns follow `order`.
///
/// Each entry of `order` is mapped back to its unique index in `labels` and
/// the output is built by double-indexing, so `order` may also name a subset
/// of the labels, yielding the corresponding sub-matrix.
///
/// # Errors
/// Returns [`ClusterError::NonSquareMatrix`] / [`ClusterError::LabelCountMismatch`]
/// for a malformed matrix or label array, [`ClusterError::AmbiguousLabel`]
/// when a label occurs more than once in `labels` (a duplicate would make
/// the mapping depend on scan order), and [`ClusterError::UnknownLabel`]
/// when an entry of `order` is absent from `labels`.
///
/// # Examples
/// ```
/// use ramify_core::reordered_matrix;
///
/// let matrix = vec![
///     vec![0.0, 1.0, 4.0],
///     vec![1.0, 0.0, 2.0],
///     vec![4.0, 2.0, 0.0],
/// ];
/// let permuted = reordered_matrix(&matrix, &["a", "b", "c"], &["c", "b", "a"])?;
/// assert_eq!(permuted[0], vec![0.0, 2.0, 4.0]);
/// # Ok::<(), ramify_core::ClusterError>(())
/// ```
pub fn reordered_matrix(
    matrix: &[Vec<f64>],
    labels: &[impl AsRef<str>],
    order: &[impl AsRef<str>],
) -> Result<Vec<Vec<f64>>> {
    let size = matrix.len();
    for (row_index, row) in matrix.iter().enumerate() {
        if row.len() != size {
            return Err(ClusterError::NonSquareMatrix {
                row: row_index,
                len: row.len(),
                size,
            });
        }
    }
    if labels.len() != size {
        return Err(ClusterError::LabelCountMismatch {
            labels: labels.len(),
            size,
        });
    }

    let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(size);
    for (index, label) in labels.iter().enumerate() {
        if index_of.insert(label.as_ref(), index).is_some() {
            return Err(ClusterError::AmbiguousLabel {
                label: label.as_ref().to_owned(),
            });
        }
    }

    let mut indices = Vec::with_capacity(order.len());
    for label in order {
        let Some(&index) = index_of.get(label.as_ref()) else {
            return Err(ClusterError::UnknownLabel {
                label: label.as_ref().to_owned(),
            });
        };
        indices.push(index);
    }

    Ok(indices
        .iter()
        .map(|&row| indices.iter().map(|&col| matrix[row][col]).collect())
        .collect())
}
