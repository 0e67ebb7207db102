//! # neumes
//!
//! Statistical fingerprints of chant melodies: symbol distributions over
//! fixed alphabets, grouping by modal category, and hierarchical clustering
//! of items by their distributions.
//!
//! ```text
//! Phrase ──► symbols ──► Distribution ──► Profile (%) ──► ClusterTree ──► cut
//!   │                                                         │
//!   └── ModalCategory ──► ModalGrouping (one tree per bucket) ┘
//! ```
//!
//! ```rust
//! use neumes::{AnalysisType, ClusterTree, DendrogramConfig, ModalCategory, Phrase, Unit};
//!
//! let phrases = vec![
//!     Phrase::parse("a", "D4 F4 A4 G4 F4 E4 D4", ModalCategory::DAuthentic).unwrap(),
//!     Phrase::parse("b", "D4 E4 F4 E4 D4", ModalCategory::DAuthentic).unwrap(),
//!     Phrase::parse("c", "A4 C5 A4 G4 A4", ModalCategory::DAuthentic).unwrap(),
//! ];
//! let tree = ClusterTree::from_items(
//!     &phrases,
//!     |p| AnalysisType::PcFreqs.distribution(p, Unit::PitchClass),
//!     &DendrogramConfig::default(),
//! )
//! .unwrap();
//!
//! let clusters = tree.get_nodes_below_cutoff(1.0, true).unwrap();
//! assert_eq!(clusters.len(), 1);
//! assert!((clusters[0].avg_distribution().sum() - 100.0).abs() < 1e-9);
//! ```
//!
//! The library logs through the `log` facade and never installs a logger.
//! The `parallel` feature builds independent trees of a batch on rayon.

pub mod cluster;
pub mod config;
pub mod distribution;
/// Error types used across `neumes`.
pub mod error;
pub mod extract;
pub mod hierarchy;
pub mod modal;
pub mod report;

pub use cluster::{DendrogramConfig, Linkage, Metric};
pub use config::AnalysisConfig;
pub use distribution::{Alphabet, Distribution, DistributionKind, Profile};
pub use error::{Error, Result};
pub use extract::{AnalysisItem, AnalysisType, Note, Phrase, Unit};
pub use hierarchy::{ClusterTree, HealthCheck, NodeView};
pub use modal::{ModalBucket, ModalCategory, ModalGrouping};
pub use report::{
    calculate_results, p_cutoff_path_stub, AnalysisResults, BatchOutcome, ClusterReport,
    ClusterSummary, ResultDescriptor,
};
