//! Dendrogram nodes and the dendrogram wrapper.
//!
//! Nodes are built bottom-up during the merge loop and are never mutated
//! once attached to a parent. The engine assigns a node's branch length at
//! the moment the node is absorbed into a merge; from then on the value is
//! fixed. Branch lengths may be negative under non-ultrametric linkages
//! (Single, Complete) and are never clamped.

use crate::reorder::depth_first_leaf_order;

/// A node of the binary dendrogram produced by clustering.
///
/// Internal nodes keep their children in merge order: the node that occupied
/// the retired slot first, then the node that occupied the kept slot. The
/// depth-first leaf order, and therefore the heat-map row order, depends on
/// this stored order.
///
/// # Examples
/// ```
/// use ramify_core::ClusterNode;
///
/// let leaf = ClusterNode::leaf("one");
/// assert!(leaf.is_leaf());
/// assert_eq!(leaf.leaf_count(), 1);
/// assert_eq!(leaf.label(), Some("one"));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClusterNode {
    /// A labelled leaf, corresponding to one row of the input matrix.
    Leaf {
        /// Caller-supplied label for this row.
        label: String,
        /// Distance from this node to its parent's merge height.
        branch_length: f64,
    },
    /// A merge of two clusters.
    Internal {
        /// Children in merge order: `[retired, kept]`.
        children: Box<[ClusterNode; 2]>,
        /// Distance from this node to its parent's merge height.
        branch_length: f64,
        /// Bootstrap replicate count supporting this split, when a consensus
        /// run attached one. Display-only; the engine never sets it.
        bootstrap_replicates: Option<u32>,
    },
}

impl ClusterNode {
    /// Creates an unattached leaf with branch length zero.
    #[must_use]
    pub fn leaf(label: impl Into<String>) -> Self {
        Self::Leaf {
            label: label.into(),
            branch_length: 0.0,
        }
    }

    /// Joins two clusters into a new internal node, fixing each child's
    /// branch length as it is attached.
    pub(crate) fn joined(
        mut retired: Self,
        retired_branch: f64,
        mut kept: Self,
        kept_branch: f64,
    ) -> Self {
        retired.set_branch_length(retired_branch);
        kept.set_branch_length(kept_branch);
        Self::Internal {
            children: Box::new([retired, kept]),
            branch_length: 0.0,
            bootstrap_replicates: None,
        }
    }

    fn set_branch_length(&mut self, value: f64) {
        match self {
            Self::Leaf { branch_length, .. } | Self::Internal { branch_length, .. } => {
                *branch_length = value;
            }
        }
    }

    /// Returns a copy of this node carrying a bootstrap replicate count.
    ///
    /// Only meaningful on internal nodes; a leaf is returned unchanged.
    #[must_use]
    pub fn with_bootstrap_replicates(mut self, replicates: u32) -> Self {
        if let Self::Internal {
            bootstrap_replicates,
            ..
        } = &mut self
        {
            *bootstrap_replicates = Some(replicates);
        }
        self
    }

    /// Returns `true` when this node is a leaf.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Returns the leaf's label, or `None` for internal nodes.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Leaf { label, .. } => Some(label),
            Self::Internal { .. } => None,
        }
    }

    /// Returns this node's branch length.
    #[must_use]
    pub const fn branch_length(&self) -> f64 {
        match self {
            Self::Leaf { branch_length, .. } | Self::Internal { branch_length, .. } => {
                *branch_length
            }
        }
    }

    /// Returns the children `[retired, kept]`, or `None` for leaves.
    #[must_use]
    pub fn children(&self) -> Option<&[Self; 2]> {
        match self {
            Self::Leaf { .. } => None,
            Self::Internal { children, .. } => Some(children),
        }
    }

    /// Returns the bootstrap replicate count, when one was attached.
    #[must_use]
    pub const fn bootstrap_replicates(&self) -> Option<u32> {
        match self {
            Self::Leaf { .. } => None,
            Self::Internal {
                bootstrap_replicates,
                ..
            } => *bootstrap_replicates,
        }
    }

    /// Counts the leaves underneath this node (inclusive for a leaf).
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { children, .. } => {
                children[0].leaf_count() + children[1].leaf_count()
            }
        }
    }

    /// Counts the internal nodes underneath this node (inclusive).
    #[must_use]
    pub fn internal_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { children, .. } => {
                1 + children[0].internal_count() + children[1].internal_count()
            }
        }
    }
}

/// The finished result of a clustering run: the root node plus conveniences.
///
/// # Examples
/// ```
/// use ramify_core::{ClustererBuilder, Linkage};
///
/// let matrix = vec![vec![0.0, 3.0], vec![3.0, 0.0]];
/// let clusterer = ClustererBuilder::new()
///     .with_linkage(Linkage::Average)
///     .build();
/// let dendrogram = clusterer.cluster(&matrix, &["a", "b"])?;
/// assert_eq!(dendrogram.leaf_count(), 2);
/// // Children are stored [retired, kept]: slot 1 ("b") was retired into
/// // slot 0 ("a"), so "b" leads the depth-first order.
/// assert_eq!(dendrogram.leaf_order(), vec!["b".to_owned(), "a".to_owned()]);
/// # Ok::<(), ramify_core::ClusterError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dendrogram {
    root: ClusterNode,
}

impl Dendrogram {
    pub(crate) const fn new(root: ClusterNode) -> Self {
        Self { root }
    }

    /// Borrows the root node.
    #[must_use]
    pub const fn root(&self) -> &ClusterNode {
        &self.root
    }

    /// Consumes the dendrogram, yielding the root node.
    #[must_use]
    pub fn into_root(self) -> ClusterNode {
        self.root
    }

    /// Number of leaves in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Canonical depth-first leaf order used to align a heat map.
    #[must_use]
    pub fn leaf_order(&self) -> Vec<String> {
        depth_first_leaf_order(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_leaf_tree() -> ClusterNode {
        ClusterNode::joined(ClusterNode::leaf("b"), 2.0, ClusterNode::leaf("a"), 2.0)
    }

    #[test]
    fn joining_fixes_child_branch_lengths() {
        let root = two_leaf_tree();
        let children = root.children().expect("internal node has children");
        assert_eq!(children[0].label(), Some("b"));
        assert_eq!(children[1].label(), Some("a"));
        assert_eq!(children[0].branch_length(), 2.0);
        assert_eq!(children[1].branch_length(), 2.0);
        assert_eq!(root.branch_length(), 0.0);
    }

    #[test]
    fn counts_leaves_and_internal_nodes() {
        let root = ClusterNode::joined(ClusterNode::leaf("c"), 1.5, two_leaf_tree(), 0.5);
        assert_eq!(root.leaf_count(), 3);
        assert_eq!(root.internal_count(), 2);
    }

    #[test]
    fn bootstrap_replicates_attach_to_internal_nodes_only() {
        let annotated = two_leaf_tree().with_bootstrap_replicates(87);
        assert_eq!(annotated.bootstrap_replicates(), Some(87));

        let leaf = ClusterNode::leaf("a").with_bootstrap_replicates(87);
        assert_eq!(leaf.bootstrap_replicates(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialises_and_deserialises_trees() {
        let dendrogram = Dendrogram::new(two_leaf_tree());
        let json = serde_json::to_string(&dendrogram).expect("tree must serialise");
        let back: Dendrogram = serde_json::from_str(&json).expect("tree must deserialise");
        assert_eq!(back, dendrogram);
    }
}
