//! Hierarchical (agglomerative) clustering of relative-frequency profiles.
//!
//! Bottom-up clustering that builds a **dendrogram** by iteratively
//! merging the closest clusters. Unlike K-means, there is no k to pick in
//! advance: the tree is cut afterwards at a normalized height.
//!
//! # Linkage Methods
//!
//! How do we define "distance between clusters"?
//!
//! | Linkage | Formula | Effect |
//! |---------|---------|--------|
//! | Single | min(d(a,b)) for a∈A, b∈B | Chaining; elongated clusters |
//! | Complete | max(d(a,b)) | Compact, spherical clusters |
//! | Average | mean(d(a,b)) | Balanced compromise (default) |
//! | Weighted | mean of the two merged clusters' distances | WPGMA |
//! | Ward | Δ variance | Minimizes within-cluster variance |
//! | Centroid | ‖μₐ − μᵦ‖ | Not monotone |
//! | Median | ‖mₐ − mᵦ‖ (WPGMC) | Not monotone |
//!
//! Centroid and median linkage can merge at a lower height than an earlier
//! merge. Heights are coerced to `max(merge distance, child heights)` so the
//! recorded tree is always a valid dendrogram.

use kodama::{linkage as kodama_linkage, Method as KodamaMethod};
use serde::{Deserialize, Serialize};

use super::metric::Metric;

/// Linkage method for hierarchical clustering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Linkage {
    /// Single linkage: minimum distance between clusters.
    Single,
    /// Complete linkage: maximum distance between clusters.
    Complete,
    /// Average linkage: mean distance between clusters (UPGMA).
    #[default]
    Average,
    /// Weighted average linkage (WPGMA).
    Weighted,
    /// Ward's method: minimize within-cluster variance.
    Ward,
    /// Distance between cluster centroids.
    Centroid,
    /// Distance between cluster medians (WPGMC).
    Median,
}

impl Linkage {
    fn method(self) -> KodamaMethod {
        match self {
            Linkage::Single => KodamaMethod::Single,
            Linkage::Complete => KodamaMethod::Complete,
            Linkage::Average => KodamaMethod::Average,
            Linkage::Weighted => KodamaMethod::Weighted,
            Linkage::Ward => KodamaMethod::Ward,
            Linkage::Centroid => KodamaMethod::Centroid,
            Linkage::Median => KodamaMethod::Median,
        }
    }
}

/// Metric and linkage used to build a cluster tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DendrogramConfig {
    /// Pairwise distance between profiles.
    pub metric: Metric,
    /// Distance between clusters.
    pub linkage: Linkage,
}

impl DendrogramConfig {
    /// Euclidean distance, average linkage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set distance metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Set linkage method.
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }
}

/// A single merge operation.
///
/// Clusters use SciPy/MATLAB-style labels: leaves are `0..n`, merge `i`
/// creates cluster `n + i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Smaller label of the two merged clusters.
    pub cluster_a: usize,
    /// Larger label of the two merged clusters.
    pub cluster_b: usize,
    /// Merge height, never below either child's height.
    pub height: f64,
    /// Number of leaves in the merged cluster.
    pub size: usize,
}

/// Run agglomerative clustering over `points`, returning `n - 1` merges.
pub fn agglomerate(points: &[&[f64]], config: &DendrogramConfig) -> Vec<Merge> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let mut condensed = config.metric.condensed(points);
    let dend = kodama_linkage(&mut condensed, n, config.linkage.method());

    let mut heights = vec![0.0f64; n];
    heights.reserve(n - 1);
    let mut merges = Vec::with_capacity(n - 1);
    for step in dend.steps() {
        let (a, b) = if step.cluster1 < step.cluster2 {
            (step.cluster1, step.cluster2)
        } else {
            (step.cluster2, step.cluster1)
        };
        let height = step.dissimilarity.max(heights[a]).max(heights[b]);
        heights.push(height);
        merges.push(Merge {
            cluster_a: a,
            cluster_b: b,
            height,
            size: step.size,
        });
    }
    merges
}
