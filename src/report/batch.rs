//! Batch orchestration: one tree per (modal category, unit).

use std::collections::btree_map::{self, BTreeMap};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{ClusterReport, ResultDescriptor};
use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::extract::{AnalysisItem, AnalysisType};
use crate::hierarchy::{ClusterTree, HealthCheck};
use crate::modal::{ModalBucket, ModalGrouping};

/// Trees keyed by caller-defined descriptors, iterated in key order.
#[derive(Debug)]
pub struct AnalysisResults<K> {
    trees: BTreeMap<K, ClusterTree>,
}

impl<K> Default for AnalysisResults<K> {
    fn default() -> Self {
        Self {
            trees: BTreeMap::new(),
        }
    }
}

impl<K: Ord> AnalysisResults<K> {
    /// Create an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `tree` under `key`, returning any tree it replaces.
    pub fn insert(&mut self, key: K, tree: ClusterTree) -> Option<ClusterTree> {
        self.trees.insert(key, tree)
    }

    /// Tree stored under `key`.
    pub fn get(&self, key: &K) -> Option<&ClusterTree> {
        self.trees.get(key)
    }

    /// True if a tree is stored under `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.trees.contains_key(key)
    }

    /// Number of trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// True when no tree was stored.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.trees.keys()
    }

    /// `(key, tree)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, K, ClusterTree> {
        self.trees.iter()
    }

    /// Cut every tree at the same threshold.
    pub fn reports(&self, p_cutoff: f64, include_leaf_nodes: bool) -> Result<Vec<(&K, ClusterReport)>> {
        self.trees
            .iter()
            .map(|(key, tree)| Ok((key, ClusterReport::from_tree(tree, p_cutoff, include_leaf_nodes)?)))
            .collect()
    }
}

impl<K: Ord> FromIterator<(K, ClusterTree)> for AnalysisResults<K> {
    fn from_iter<I: IntoIterator<Item = (K, ClusterTree)>>(iter: I) -> Self {
        Self {
            trees: iter.into_iter().collect(),
        }
    }
}

impl<'a, K> IntoIterator for &'a AnalysisResults<K> {
    type Item = (&'a K, &'a ClusterTree);
    type IntoIter = btree_map::Iter<'a, K, ClusterTree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.iter()
    }
}

/// A combination whose tree could not be built.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    /// The combination that failed.
    pub descriptor: ResultDescriptor,
    /// Why its tree could not be built.
    pub error: Error,
}

/// Everything a batch run produced.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Trees that were built.
    pub results: AnalysisResults<ResultDescriptor>,
    /// Combinations that were skipped, in bucket then unit order.
    pub failures: Vec<BatchFailure>,
}

/// Group `items` by modal category and build one tree per (category, unit).
///
/// Units the analysis is not defined for are skipped. A combination that
/// fails (an empty bucket, a symbol outside the alphabet) is logged and
/// recorded in [`BatchOutcome::failures`]; the remaining combinations still run.
pub fn calculate_results<T>(
    repertoire: &str,
    items: &[T],
    analysis: AnalysisType,
    config: &AnalysisConfig,
) -> BatchOutcome
where
    T: AnalysisItem + Sync,
{
    let grouping = ModalGrouping::new(items);
    let jobs = plan(repertoire, &grouping, analysis, config);

    #[cfg(feature = "parallel")]
    let built = build_parallel(jobs, config);

    #[cfg(not(feature = "parallel"))]
    let built = build_serial(jobs, config);

    let mut results = AnalysisResults::new();
    let mut failures = Vec::new();
    for (descriptor, tree) in built {
        match tree {
            Ok(tree) => {
                results.insert(descriptor, tree);
            }
            Err(error) => {
                log::warn!("skipping {}: {error}", descriptor.description());
                failures.push(BatchFailure { descriptor, error });
            }
        }
    }
    log::info!(
        "{repertoire}: built {} trees, {} combinations failed",
        results.len(),
        failures.len()
    );
    BatchOutcome { results, failures }
}

type Job<'g, 'a, T> = (ResultDescriptor, &'g ModalBucket<'a, T>);
type Built = Vec<(ResultDescriptor, Result<ClusterTree>)>;

/// Every (bucket, supported unit) combination, in bucket then unit order.
fn plan<'g, 'a, T: AnalysisItem>(
    repertoire: &str,
    grouping: &'g ModalGrouping<'a, T>,
    analysis: AnalysisType,
    config: &AnalysisConfig,
) -> Vec<Job<'g, 'a, T>> {
    let mut jobs = Vec::new();
    for bucket in grouping.buckets() {
        for &unit in &config.units {
            if !analysis.supports(unit) {
                log::debug!("{analysis:?} is not defined for {unit:?}, skipping");
                continue;
            }
            jobs.push((
                ResultDescriptor::new(repertoire, analysis, unit, bucket.category()),
                bucket,
            ));
        }
    }
    jobs
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn build_serial<T: AnalysisItem>(jobs: Vec<Job<'_, '_, T>>, config: &AnalysisConfig) -> Built {
    jobs.into_iter()
        .map(|(descriptor, bucket)| {
            let tree = build_one(&descriptor, bucket, config);
            (descriptor, tree)
        })
        .collect()
}

/// Same output as [`build_serial`], order included.
#[cfg(feature = "parallel")]
fn build_parallel<T: AnalysisItem + Sync>(jobs: Vec<Job<'_, '_, T>>, config: &AnalysisConfig) -> Built {
    jobs.into_par_iter()
        .map(|(descriptor, bucket)| {
            let tree = build_one(&descriptor, bucket, config);
            (descriptor, tree)
        })
        .collect()
}

fn build_one<T: AnalysisItem>(
    descriptor: &ResultDescriptor,
    bucket: &ModalBucket<'_, T>,
    config: &AnalysisConfig,
) -> Result<ClusterTree> {
    log::info!(
        "Calculating results for {} ({} items)",
        descriptor.description(),
        bucket.len()
    );
    let distributions = bucket.distributions(descriptor.analysis, descriptor.unit)?;
    let tree = ClusterTree::build(distributions, &config.dendrogram_config())?;
    let health = tree.health_check();
    if !health.is_healthy() {
        log::warn!("{}: {}", descriptor.description(), health.validation);
    }
    Ok(tree)
}
