//! The cluster tree built over a set of named distributions.

use core::ops::Range;
use std::collections::BTreeMap;

use super::node::{ClusterNode, NodeView};
use crate::cluster::{agglomerate, DendrogramConfig, Merge};
use crate::distribution::{Alphabet, Distribution, Profile};
use crate::error::{Error, Result};
use crate::extract::AnalysisItem;

/// Immutable dendrogram over named items.
///
/// Items are ordered by name before clustering, so the same set of items
/// with the same configuration always yields the same tree and the same
/// cluster ids, whatever order the caller supplied them in.
#[derive(Debug)]
pub struct ClusterTree {
    alphabet: Alphabet,
    config: DendrogramConfig,
    /// Item names by leaf id (left-to-right leaf order).
    names: Vec<String>,
    /// Relative-frequency vectors by leaf id.
    profiles: Vec<Profile>,
    /// All `2n - 1` nodes, indexed by cluster id; merges follow the leaves.
    nodes: Vec<ClusterNode>,
}

impl ClusterTree {
    /// Build a tree from `(name, distribution)` pairs.
    ///
    /// Fails on empty input, repeated names, or distributions over
    /// different alphabets. Nothing is returned unless the whole tree was built.
    pub fn build<I, K>(items: I, config: &DendrogramConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Distribution)>,
        K: Into<String>,
    {
        let mut sorted = BTreeMap::new();
        for (name, dist) in items {
            let name: String = name.into();
            if sorted.contains_key(&name) {
                return Err(Error::DuplicateItem { name });
            }
            sorted.insert(name, dist);
        }

        let alphabet = match sorted.values().next() {
            Some(first) => first.alphabet().clone(),
            None => return Err(Error::EmptyInput),
        };
        for dist in sorted.values() {
            alphabet.ensure_same(dist.alphabet())?;
        }

        let (names, profiles): (Vec<String>, Vec<Profile>) = sorted
            .into_iter()
            .map(|(name, dist)| (name, dist.relative()))
            .unzip();

        let points: Vec<&[f64]> = profiles.iter().map(Profile::values).collect();
        let merges = agglomerate(&points, config);

        let tree = Self::from_merges(alphabet, *config, names, profiles, &merges);
        log::debug!(
            "built cluster tree: {} items, {:?}/{:?}, root height {:.4}",
            tree.num_items(),
            config.metric,
            config.linkage,
            tree.max_height()
        );
        Ok(tree)
    }

    /// Build a tree by running `analysis` on every item.
    pub fn from_items<T, F>(items: &[T], analysis: F, config: &DendrogramConfig) -> Result<Self>
    where
        T: AnalysisItem,
        F: Fn(&T) -> Result<Distribution>,
    {
        let pairs = items
            .iter()
            .map(|item| Ok((item.name().to_string(), analysis(item)?)))
            .collect::<Result<Vec<_>>>()?;
        Self::build(pairs, config)
    }

    /// Lay out nodes from a merge list over leaves labelled `0..n`.
    fn from_merges(
        alphabet: Alphabet,
        config: DendrogramConfig,
        names: Vec<String>,
        profiles: Vec<Profile>,
        merges: &[Merge],
    ) -> Self {
        let n = names.len();
        let root_label = 2 * n - 2;

        // Left-to-right leaf order: depth first, smaller label on the left.
        let mut leaf_order = Vec::with_capacity(n);
        let mut stack = vec![root_label];
        while let Some(label) = stack.pop() {
            if label < n {
                leaf_order.push(label);
            } else {
                let m = &merges[label - n];
                stack.push(m.cluster_b);
                stack.push(m.cluster_a);
            }
        }

        let mut position = vec![0usize; n];
        for (pos, &label) in leaf_order.iter().enumerate() {
            position[label] = pos;
        }
        let id_of = |label: usize| if label < n { position[label] } else { label };

        let mut nodes: Vec<ClusterNode> = (0..n).map(ClusterNode::leaf).collect();
        for (i, m) in merges.iter().enumerate() {
            let node = ClusterNode::internal(
                n + i,
                m.height,
                &nodes[id_of(m.cluster_a)],
                &nodes[id_of(m.cluster_b)],
            );
            nodes.push(node);
        }

        let mut slots: Vec<Option<(String, Profile)>> =
            names.into_iter().zip(profiles).map(Some).collect();
        let (names, profiles) = leaf_order
            .iter()
            .filter_map(|&label| slots[label].take())
            .unzip();

        Self {
            alphabet,
            config,
            names,
            profiles,
            nodes,
        }
    }

    pub(crate) fn view(&self, cluster_id: usize) -> NodeView<'_> {
        NodeView {
            tree: self,
            node: &self.nodes[cluster_id],
        }
    }

    pub(crate) fn mean_profile(&self, leaves: Range<usize>) -> Profile {
        Profile::mean_of(&self.alphabet, &self.profiles[leaves])
    }

    /// The root node.
    pub fn root(&self) -> NodeView<'_> {
        self.view(self.nodes.len() - 1)
    }

    /// Node by cluster id.
    pub fn node(&self, cluster_id: usize) -> Option<NodeView<'_>> {
        (cluster_id < self.nodes.len()).then(|| self.view(cluster_id))
    }

    /// All nodes in id order: leaves first, then merges.
    pub fn nodes(&self) -> impl Iterator<Item = NodeView<'_>> + '_ {
        (0..self.nodes.len()).map(|id| self.view(id))
    }

    /// Number of nodes (`2n - 1`).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of input items.
    pub fn num_items(&self) -> usize {
        self.names.len()
    }

    /// Item names in left-to-right leaf order.
    pub fn leaf_order(&self) -> &[String] {
        &self.names
    }

    /// Relative-frequency vector of a leaf.
    pub fn leaf_profile(&self, leaf_id: usize) -> Option<&Profile> {
        self.profiles.get(leaf_id)
    }

    /// Height of the root (0 when all items are identical).
    pub fn max_height(&self) -> f64 {
        self.nodes.last().map_or(0.0, |n| n.height)
    }

    /// The alphabet all items were counted over.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Metric and linkage used.
    pub fn config(&self) -> &DendrogramConfig {
        &self.config
    }

    /// Merge rows `[left_id, right_id, height, size]` in merge order, for plotting.
    pub fn linkage_matrix(&self) -> Vec<[f64; 4]> {
        self.nodes[self.num_items()..]
            .iter()
            .filter_map(|node| {
                let (l, r) = node.children?;
                Some([l as f64, r as f64, node.height, node.leaf_span.len() as f64])
            })
            .collect()
    }

    /// Maximal subtrees whose merges all happened at or below `p_cutoff * max_height`.
    ///
    /// The selected nodes partition the leaves and are returned left to
    /// right. With `include_leaf_nodes == false`, singletons are dropped
    /// after selection. Both extremes are valid: 0 yields the leaves (unless
    /// some items are identical), 1 yields the root.
    pub fn get_nodes_below_cutoff(
        &self,
        p_cutoff: f64,
        include_leaf_nodes: bool,
    ) -> Result<Vec<NodeView<'_>>> {
        let threshold = self.threshold(p_cutoff)?;
        let mut selected = Vec::new();
        let mut stack = vec![self.nodes.len() - 1];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            match node.children {
                Some((left, right)) if node.height > threshold => {
                    stack.push(right);
                    stack.push(left);
                }
                _ => selected.push(self.view(id)),
            }
        }
        if !include_leaf_nodes {
            selected.retain(|v| v.num_leaves() > 1);
        }
        Ok(selected)
    }

    /// Flat cluster assignment at `p_cutoff`: item name → selected node's id.
    pub fn cut_labels(&self, p_cutoff: f64) -> Result<BTreeMap<&str, usize>> {
        let mut labels = BTreeMap::new();
        for node in self.get_nodes_below_cutoff(p_cutoff, true)? {
            for name in node.leaves() {
                labels.insert(name.as_str(), node.cluster_id());
            }
        }
        Ok(labels)
    }

    fn threshold(&self, p_cutoff: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&p_cutoff) {
            return Err(Error::InvalidParameter {
                name: "p_cutoff",
                message: format!("must lie in [0, 1], got {p_cutoff}"),
            });
        }
        Ok(p_cutoff * self.max_height())
    }
}
