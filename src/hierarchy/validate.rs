//! Cluster tree validation and health checking.
//!
//! Verifies the structural invariants of a built dendrogram:
//! - `2n - 1` nodes for `n` items, with exactly `n` leaves at height 0
//! - every parent sits at or above both children
//! - children's leaf spans are adjacent and together make up the parent's
//! - every leaf is reachable from the root exactly once
//! - each row of a cached mean profile sums to 100 (or 0 when that row is empty in every leaf)
//!
//! # Example
//!
//! ```rust
//! use neumes::{Alphabet, ClusterTree, DendrogramConfig, Distribution, HealthCheck};
//!
//! let abc = Alphabet::custom("abc", ["A", "B", "C"]).unwrap();
//! let items = vec![
//!     ("x", Distribution::from_symbols(&abc, ["A", "A", "B"]).unwrap()),
//!     ("y", Distribution::from_symbols(&abc, ["C"]).unwrap()),
//! ];
//! let tree = ClusterTree::build(items, &DendrogramConfig::default()).unwrap();
//! let report = tree.health_check();
//! assert!(report.is_healthy(), "{report}");
//! ```

use std::collections::HashMap;
use std::fmt;

use super::ClusterTree;

const PROFILE_SUM_TOLERANCE: f64 = 1e-6;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational, not a problem.
    Info,
    /// Something unusual but not necessarily wrong.
    Warning,
    /// A broken invariant.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single validation issue found during a health check.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity of the issue.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Cluster id involved, if any.
    pub node_id: Option<usize>,
}

impl ValidationIssue {
    /// Create a new validation issue.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            node_id: None,
        }
    }

    /// Attach a cluster id.
    pub fn with_node(mut self, id: usize) -> Self {
        self.node_id = Some(id);
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)?;
        if let Some(id) = self.node_id {
            write!(f, " (node {})", id)?;
        }
        Ok(())
    }
}

/// Issues collected by a health check.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// All issues found.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Add a warning-level issue.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.add(ValidationIssue::new(Severity::Warning, message));
    }

    /// Add an error-level issue.
    pub fn error(&mut self, message: impl Into<String>) {
        self.add(ValidationIssue::new(Severity::Error, message));
    }

    /// True if no issue reaches `Error`.
    pub fn is_healthy(&self) -> bool {
        !self.issues.iter().any(|i| i.severity >= Severity::Error)
    }

    /// True if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Count issues by severity.
    pub fn counts(&self) -> HashMap<Severity, usize> {
        let mut counts = HashMap::new();
        for issue in &self.issues {
            *counts.entry(issue.severity).or_default() += 1;
        }
        counts
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "Validation passed: no issues found");
        }

        let counts = self.counts();
        let parts: Vec<String> = [
            (Severity::Error, "errors"),
            (Severity::Warning, "warnings"),
            (Severity::Info, "info"),
        ]
        .iter()
        .filter_map(|(sev, name)| counts.get(sev).map(|c| format!("{} {}", c, name)))
        .collect();
        writeln!(f, "Validation report: {}", parts.join(", "))?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}

/// Health report with summary statistics.
#[derive(Debug, Clone)]
pub struct HealthReport {
    /// Validation issues.
    pub validation: ValidationReport,
    /// Total number of nodes.
    pub node_count: usize,
    /// Number of leaf nodes.
    pub leaf_count: usize,
    /// Root height.
    pub max_height: f64,
    /// Longest root-to-leaf path, in edges.
    pub depth: usize,
}

impl HealthReport {
    /// Check if the tree is healthy (no broken invariants).
    pub fn is_healthy(&self) -> bool {
        self.validation.is_healthy()
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tree Health Report")?;
        writeln!(f, "==================")?;
        writeln!(f, "Nodes: {} ({} leaves)", self.node_count, self.leaf_count)?;
        writeln!(f, "Root height: {:.4}", self.max_height)?;
        writeln!(f, "Depth: {}", self.depth)?;
        writeln!(f)?;
        write!(f, "{}", self.validation)
    }
}

/// Trait for types that can be health-checked.
pub trait HealthCheck {
    /// Perform a health check and return a report.
    fn health_check(&self) -> HealthReport;

    /// Quick check: returns true if healthy.
    fn is_healthy(&self) -> bool {
        self.health_check().is_healthy()
    }
}

impl HealthCheck for ClusterTree {
    fn health_check(&self) -> HealthReport {
        let mut validation = ValidationReport::new();
        let n = self.num_items();
        let node_count = self.len();

        if node_count != 2 * n - 1 {
            validation.error(format!(
                "expected {} nodes for {} items, found {}",
                2 * n - 1,
                n,
                node_count
            ));
        }

        let mut leaf_count = 0;
        for node in self.nodes() {
            let id = node.cluster_id();
            if !node.height().is_finite() || node.height() < 0.0 {
                validation.add(
                    ValidationIssue::new(Severity::Error, "height is negative or not finite")
                        .with_node(id),
                );
            }
            match node.children() {
                None => {
                    leaf_count += 1;
                    if node.height() != 0.0 || node.num_leaves() != 1 {
                        validation.add(
                            ValidationIssue::new(Severity::Error, "leaf with non-zero height or span")
                                .with_node(id),
                        );
                    }
                }
                Some((left, right)) => {
                    if node.height() < left.height().max(right.height()) {
                        validation.add(
                            ValidationIssue::new(Severity::Error, "parent sits below a child")
                                .with_node(id),
                        );
                    }
                    let (l, r) = (left.leaf_ids(), right.leaf_ids());
                    if l.end != r.start || l.start != node.leaf_ids().start || r.end != node.leaf_ids().end {
                        validation.add(
                            ValidationIssue::new(Severity::Error, "children's leaf spans do not tile the parent")
                                .with_node(id),
                        );
                    }
                }
            }
            if let Some(avg) = node.node.avg.get() {
                let off = avg.row_sums().into_iter().find(|sum| {
                    sum.abs() > PROFILE_SUM_TOLERANCE && (sum - 100.0).abs() > PROFILE_SUM_TOLERANCE
                });
                if let Some(sum) = off {
                    validation.add(
                        ValidationIssue::new(
                            Severity::Warning,
                            format!("mean profile row sums to {sum:.6}, expected 0 or 100"),
                        )
                        .with_node(id),
                    );
                }
            }
        }
        if leaf_count != n {
            validation.error(format!("expected {n} leaves, found {leaf_count}"));
        }

        // Walk from the root: every leaf must be reached exactly once.
        let mut hits = vec![0usize; n];
        let mut depth = 0;
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((node, d)) = stack.pop() {
            depth = depth.max(d);
            match node.children() {
                Some((left, right)) => {
                    stack.push((right, d + 1));
                    stack.push((left, d + 1));
                }
                None => {
                    if let Some(h) = hits.get_mut(node.cluster_id()) {
                        *h += 1;
                    }
                }
            }
        }
        if hits.iter().any(|&h| h != 1) {
            validation.error("leaves are not reached exactly once from the root");
        }

        HealthReport {
            validation,
            node_count,
            leaf_count,
            max_height: self.max_height(),
            depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::DendrogramConfig;
    use crate::distribution::{Alphabet, Distribution};
    use proptest::prelude::*;

    #[test]
    fn report_display_counts_issues() {
        let mut report = ValidationReport::new();
        assert!(report.is_clean());
        report.warn("odd");
        assert!(report.is_healthy());
        report.error("broken");
        assert!(!report.is_healthy());
        let text = report.to_string();
        assert!(text.starts_with("Validation report: 1 errors, 1 warnings"));
        assert!(text.contains("[ERROR] broken"));
    }

    #[test]
    fn lone_leaf_is_healthy() {
        let abc = Alphabet::custom("abc", ["A", "B", "C"]).unwrap();
        let tree = ClusterTree::build(
            [("a", Distribution::zero(&abc))],
            &DendrogramConfig::default(),
        )
        .unwrap();
        let report = tree.health_check();
        assert!(report.validation.is_clean(), "{report}");
        assert_eq!(report.depth, 0);
        assert_eq!(report.leaf_count, 1);
    }

    #[test]
    fn transition_profiles_check_rows() {
        let abc = Alphabet::custom("abc", ["A", "B", "C"]).unwrap();
        let t = Alphabet::transitions(&abc);
        let items = vec![
            ("x", Distribution::from_symbols(&t, ["A_B", "B_C"]).unwrap()),
            ("y", Distribution::from_symbols(&t, ["A_C", "B_A"]).unwrap()),
        ];
        let tree = ClusterTree::build(items, &DendrogramConfig::default()).unwrap();
        let root = tree.root().avg_distribution();
        assert_eq!(root.row_sums(), vec![100.0, 100.0, 0.0]);
        let report = tree.health_check();
        assert!(report.validation.is_clean(), "{report}");
    }

    proptest! {
        #[test]
        fn built_trees_are_healthy(
            counts in proptest::collection::vec(proptest::collection::vec(0u64..15, 4), 1..30)
        ) {
            let alphabet = Alphabet::custom("abcd", ["A", "B", "C", "D"]).unwrap();
            let items = counts.iter().enumerate().map(|(i, c)| {
                (format!("p{i}"), Distribution::from_counts(&alphabet, c.clone()).unwrap())
            });
            let tree = ClusterTree::build(items, &DendrogramConfig::default()).unwrap();
            for node in tree.nodes() {
                let _ = node.avg_distribution();
            }
            // Clusters mixing empty and non-empty items may warn; nothing may fail.
            let report = tree.health_check();
            prop_assert!(report.is_healthy(), "{}", report);
        }
    }
}
