//! Serializable snapshot of a tree cut.

use serde::Serialize;

use crate::error::Result;
use crate::hierarchy::{ClusterTree, NodeView};

/// One selected cluster, as handed to chart and table exporters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    /// Stable node id within its tree.
    pub cluster_id: usize,
    /// Number of items in the cluster.
    pub num_leaves: usize,
    /// `#<id> (<n> leaves)` or `Leaf #<id>`.
    pub label: String,
    /// Merge height (0 for a single item).
    pub height: f64,
    /// Item names in leaf order.
    pub members: Vec<String>,
    /// Mean relative frequencies as `(symbol, percent)` in alphabet order.
    pub avg_distribution: Vec<(String, f64)>,
}

impl From<NodeView<'_>> for ClusterSummary {
    fn from(node: NodeView<'_>) -> Self {
        Self {
            cluster_id: node.cluster_id(),
            num_leaves: node.num_leaves(),
            label: node.label(),
            height: node.height(),
            members: node.leaves().to_vec(),
            avg_distribution: node.avg_distribution().to_pairs(),
        }
    }
}

/// The clusters selected by one cut, left to right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterReport {
    /// Cutoff the tree was cut at.
    pub p_cutoff: f64,
    /// Whether single-item clusters were kept.
    pub include_leaf_nodes: bool,
    /// Alphabet the distributions are over.
    pub symbols: Vec<String>,
    /// Selected clusters, left to right.
    pub clusters: Vec<ClusterSummary>,
}

impl ClusterReport {
    /// Cut `tree` and summarize the selected nodes.
    pub fn from_tree(tree: &ClusterTree, p_cutoff: f64, include_leaf_nodes: bool) -> Result<Self> {
        let clusters: Vec<ClusterSummary> = tree
            .get_nodes_below_cutoff(p_cutoff, include_leaf_nodes)?
            .into_iter()
            .map(ClusterSummary::from)
            .collect();
        if clusters.is_empty() {
            log::warn!(
                "no clusters below p_cutoff={p_cutoff} (include_leaf_nodes={include_leaf_nodes}, {} items)",
                tree.num_items()
            );
        }
        Ok(Self {
            p_cutoff,
            include_leaf_nodes,
            symbols: tree.alphabet().symbols().to_vec(),
            clusters,
        })
    }

    /// True when the cut selected nothing.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of selected clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }
}
