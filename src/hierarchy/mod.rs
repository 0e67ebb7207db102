//! Cluster trees over named items and their flat cuts.
//!
//! A [`ClusterTree`] records the complete merge history of agglomerative
//! clustering over items' relative-frequency profiles:
//!
//! ```text
//!              4 (height=124.7)
//!             / \
//!            /   3 (height=47.1)
//!           /   / \
//!          0   1   2        leaves, in left-to-right leaf order
//!          z   x   y
//! ```
//!
//! Leaves take ids `0..n` in leaf order and merges take `n..2n-1`, so ids
//! are reproducible for a given item set, metric and linkage.
//!
//! # Cutting
//!
//! [`ClusterTree::get_nodes_below_cutoff`] takes `p_cutoff` in `[0, 1]`,
//! scales it by the root height, and walks down from the root: a node whose
//! height is at or below the threshold is selected whole, otherwise its two
//! children are examined. The selected nodes partition the items.
//!
//! ```text
//! p_cutoff = 1.0  →  [4]
//! p_cutoff = 0.5  →  [0, 3]        (threshold 62.4)
//! p_cutoff = 0.1  →  [0, 1, 2]     (threshold 12.5)
//! ```
//!
//! Each selected node exposes the mean of its leaves' profiles
//! ([`NodeView::avg_distribution`]), computed once and cached.

mod node;
mod tree;
mod validate;

pub use node::{ClusterNode, NodeView};
pub use tree::ClusterTree;
pub use validate::{HealthCheck, HealthReport, Severity, ValidationIssue, ValidationReport};
