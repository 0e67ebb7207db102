//! Cluster tree nodes.

use core::fmt;
use core::ops::Range;
use std::sync::OnceLock;

use super::ClusterTree;
use crate::distribution::Profile;

/// A node of a [`ClusterTree`].
///
/// Leaves occupy ids `0..n` in left-to-right leaf order; internal nodes take
/// `n..2n-1` in merge order. Because ids follow leaf order, every node's
/// leaves form a contiguous span of leaf ids.
#[derive(Debug)]
pub struct ClusterNode {
    /// Stable identifier.
    pub(crate) cluster_id: usize,
    /// Merge height (0 for leaves).
    pub(crate) height: f64,
    /// Left and right child ids.
    pub(crate) children: Option<(usize, usize)>,
    /// Leaf ids under this node.
    pub(crate) leaf_span: Range<usize>,
    /// Mean of the leaves' profiles, filled on first access.
    pub(crate) avg: OnceLock<Profile>,
}

impl ClusterNode {
    pub(crate) fn leaf(cluster_id: usize) -> Self {
        Self {
            cluster_id,
            height: 0.0,
            children: None,
            leaf_span: cluster_id..cluster_id + 1,
            avg: OnceLock::new(),
        }
    }

    pub(crate) fn internal(cluster_id: usize, height: f64, left: &ClusterNode, right: &ClusterNode) -> Self {
        Self {
            cluster_id,
            height,
            children: Some((left.cluster_id, right.cluster_id)),
            leaf_span: left.leaf_span.start.min(right.leaf_span.start)
                ..left.leaf_span.end.max(right.leaf_span.end),
            avg: OnceLock::new(),
        }
    }
}

/// Borrowed view of a node together with its tree.
///
/// This is what cuts and accessors hand out to plotting and export code.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    pub(crate) tree: &'a ClusterTree,
    pub(crate) node: &'a ClusterNode,
}

impl<'a> NodeView<'a> {
    /// Stable identifier; file names and plot labels key off it.
    pub fn cluster_id(&self) -> usize {
        self.node.cluster_id
    }

    /// Merge height (0 for leaves).
    pub fn height(&self) -> f64 {
        self.node.height
    }

    /// Number of leaves in this subtree.
    pub fn num_leaves(&self) -> usize {
        self.node.leaf_span.len()
    }

    /// Check if this is a leaf node.
    pub fn is_leaf(&self) -> bool {
        self.node.children.is_none()
    }

    /// Item names under this node, in leaf order.
    pub fn leaves(&self) -> &'a [String] {
        &self.tree.leaf_order()[self.node.leaf_span.clone()]
    }

    /// Leaf ids under this node.
    pub fn leaf_ids(&self) -> Range<usize> {
        self.node.leaf_span.clone()
    }

    /// Left and right children, `None` for leaves.
    pub fn children(&self) -> Option<(NodeView<'a>, NodeView<'a>)> {
        self.node
            .children
            .map(|(l, r)| (self.tree.view(l), self.tree.view(r)))
    }

    /// Mean relative-frequency vector of the leaves, equal weight per item.
    ///
    /// Computed on first access and cached for the lifetime of the tree.
    pub fn avg_distribution(&self) -> &'a Profile {
        self.node
            .avg
            .get_or_init(|| self.tree.mean_profile(self.node.leaf_span.clone()))
    }

    /// Axis label: `#<id> (<n> leaves)` for clusters, `Leaf #<id>` for leaves.
    pub fn label(&self) -> String {
        if self.num_leaves() > 1 {
            format!("#{} ({} leaves)", self.cluster_id(), self.num_leaves())
        } else {
            format!("Leaf #{}", self.cluster_id())
        }
    }
}

impl PartialEq for NodeView<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.node.cluster_id == other.node.cluster_id
    }
}

impl fmt::Debug for NodeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("cluster_id", &self.cluster_id())
            .field("height", &self.height())
            .field("leaves", &self.leaves())
            .finish()
    }
}

impl fmt::Display for NodeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            write!(f, "Leaf[{}]: {}", self.cluster_id(), self.leaves().join(", "))
        } else {
            write!(
                f,
                "Node[{}] h={:.3}: {}",
                self.cluster_id(),
                self.height(),
                self.leaves().join(", ")
            )
        }
    }
}
