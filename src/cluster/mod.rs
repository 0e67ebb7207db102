//! Agglomerative clustering of relative-frequency profiles.
//!
//! Bottom-up: start with each item as its own cluster, repeatedly merge the
//! two closest clusters until one remains. The merge history forms a
//! **dendrogram**, a binary tree that [`ClusterTree`](crate::ClusterTree)
//! cuts at a normalized height.
//!
//! Two choices shape the tree, and both are parameters rather than fixed:
//!
//! - the [`Metric`] between two items' profiles (Euclidean by default), and
//! - the [`Linkage`] rule between clusters (average by default).
//!
//! ```rust
//! use neumes::cluster::{agglomerate, DendrogramConfig, Linkage, Metric};
//!
//! let profiles: Vec<Vec<f64>> = vec![
//!     vec![60.0, 40.0, 0.0],
//!     vec![55.0, 45.0, 0.0],
//!     vec![0.0, 10.0, 90.0],
//! ];
//! let points: Vec<&[f64]> = profiles.iter().map(Vec::as_slice).collect();
//! let config = DendrogramConfig::new()
//!     .with_metric(Metric::Cityblock)
//!     .with_linkage(Linkage::Complete);
//! let merges = agglomerate(&points, &config);
//! assert_eq!(merges.len(), 2);
//! assert_eq!((merges[0].cluster_a, merges[0].cluster_b), (0, 1));
//! ```

mod hierarchical;
mod metric;

pub use hierarchical::{agglomerate, DendrogramConfig, Linkage, Merge};
pub use metric::Metric;
