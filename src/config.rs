//! Run settings, loaded from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cluster::{DendrogramConfig, Linkage, Metric};
use crate::error::{Error, Result};
use crate::extract::Unit;

/// Settings for one analysis run, loadable from TOML.
/// All fields have defaults, so an empty document is a valid configuration.
///
/// ```toml
/// p_cutoff = 0.3
/// include_leaf_nodes = false
/// metric = "correlation"
/// linkage = "complete"
/// units = ["pitch_class"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Normalized tree-cut threshold in `[0, 1]`.
    pub p_cutoff: f64,
    /// Keep clusters consisting of a single item.
    pub include_leaf_nodes: bool,
    /// Distance between item profiles.
    pub metric: Metric,
    /// Distance between clusters.
    pub linkage: Linkage,
    /// Units to analyse; unsupported (analysis, unit) pairs are skipped.
    pub units: Vec<Unit>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            p_cutoff: 0.4,
            include_leaf_nodes: true,
            metric: Metric::default(),
            linkage: Linkage::default(),
            units: Unit::ALL.to_vec(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded analysis config from {}", path.display());
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Reject values the engine cannot use.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.p_cutoff) {
            return Err(Error::InvalidParameter {
                name: "p_cutoff",
                message: format!("must lie in [0, 1], got {}", self.p_cutoff),
            });
        }
        if self.units.is_empty() {
            return Err(Error::InvalidParameter {
                name: "units",
                message: "at least one unit is required".to_string(),
            });
        }
        Ok(())
    }

    /// Metric and linkage for tree construction.
    pub fn dendrogram_config(&self) -> DendrogramConfig {
        DendrogramConfig::new()
            .with_metric(self.metric)
            .with_linkage(self.linkage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() -> Result<()> {
        let config = AnalysisConfig::from_toml_str("")?;
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.dendrogram_config(), DendrogramConfig::default());
        Ok(())
    }

    #[test]
    fn parses_all_fields() -> Result<()> {
        let config = AnalysisConfig::from_toml_str(
            r#"
            p_cutoff = 0.25
            include_leaf_nodes = false
            metric = "correlation"
            linkage = "ward"
            units = ["mode_degree"]
            "#,
        )?;
        assert_eq!(config.p_cutoff, 0.25);
        assert!(!config.include_leaf_nodes);
        assert_eq!(config.metric, Metric::Correlation);
        assert_eq!(config.linkage, Linkage::Ward);
        assert_eq!(config.units, vec![Unit::ModeDegree]);
        Ok(())
    }

    #[test]
    fn rejects_out_of_range_cutoff() {
        assert!(matches!(
            AnalysisConfig::from_toml_str("p_cutoff = 1.5"),
            Err(Error::InvalidParameter { name: "p_cutoff", .. })
        ));
        assert!(matches!(
            AnalysisConfig::from_toml_str("units = []"),
            Err(Error::InvalidParameter { name: "units", .. })
        ));
    }

    #[test]
    fn rejects_unknown_metric() {
        assert!(matches!(
            AnalysisConfig::from_toml_str(r#"metric = "hamming""#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn round_trips_through_toml() -> Result<()> {
        let config = AnalysisConfig {
            p_cutoff: 0.1,
            linkage: Linkage::Single,
            ..AnalysisConfig::default()
        };
        let text = config.to_toml_string()?;
        assert_eq!(AnalysisConfig::from_toml_str(&text)?, config);
        Ok(())
    }

    #[test]
    fn missing_file_is_a_config_error() {
        assert!(matches!(
            AnalysisConfig::from_path("/nonexistent/neumes.toml"),
            Err(Error::Config(_))
        ));
    }
}
