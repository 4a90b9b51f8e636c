//! Ramify core library.
//!
//! Agglomerative hierarchical clustering over a caller-supplied square
//! pairwise-distance matrix. The engine builds a binary dendrogram (a tree
//! with branch lengths) under one of three linkage strategies and derives the
//! canonical depth-first leaf order used to align a heat map with the tree.
//!
//! The distance matrix is conceptually symmetric; the lower triangle is
//! authoritative. The engine works on a private copy and never mutates
//! caller-owned data.
//!
//! # Determinism
//!
//! Given identical inputs the engine produces structurally identical trees:
//! the closest-pair scan visits active pairs `(i, j)` with `i > j` in
//! row-major order and the first pair encountered wins ties, and a merge
//! retains the slot with the larger leaf count (equal counts retain the
//! smaller slot id). Both rules are documented contracts relied upon by
//! downstream consumers, not incidental behaviour.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod agglomerator;
mod builder;
mod clusterer;
mod error;
mod linkage;
mod matrix;
mod node;
mod reorder;
mod table;

pub use crate::{
    agglomerator::{Agglomerator, MergeStep, Phase},
    builder::ClustererBuilder,
    clusterer::Clusterer,
    error::{ClusterError, ClusterErrorCode, Result},
    linkage::Linkage,
    node::{ClusterNode, Dendrogram},
    reorder::{depth_first_leaf_order, reordered_matrix},
};
