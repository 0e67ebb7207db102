//! Keys identifying one analysis run.

use core::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::extract::{AnalysisType, Unit};
use crate::modal::ModalCategory;

/// Identifies one (repertoire, analysis, unit, modal category) combination.
///
/// Results are keyed by it, and exporters derive directory layout and
/// titles from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResultDescriptor {
    /// Repertoire or genre the items were drawn from.
    pub repertoire: String,
    /// What was computed.
    pub analysis: AnalysisType,
    /// Unit the symbols are expressed in.
    pub unit: Unit,
    /// Modal bucket the items came from.
    pub modal_category: ModalCategory,
}

impl ResultDescriptor {
    /// Key for one combination.
    pub fn new(
        repertoire: impl Into<String>,
        analysis: AnalysisType,
        unit: Unit,
        modal_category: ModalCategory,
    ) -> Self {
        Self {
            repertoire: repertoire.into(),
            analysis,
            unit,
            modal_category,
        }
    }

    /// Directory components, outermost first.
    ///
    /// `plainchant_sequences / pc_freqs / pcs / authentic_modes / G_authentic`
    pub fn path_stubs(&self) -> Vec<String> {
        let (ambitus, mode) = self.modal_category.output_path_stubs();
        vec![
            self.repertoire.clone(),
            self.analysis.output_path_stub().to_string(),
            self.unit.output_path_stub().to_string(),
            ambitus,
            mode,
        ]
    }

    /// Directory under `root` where this run's artefacts belong.
    pub fn output_dir(&self, root: impl AsRef<Path>) -> PathBuf {
        let mut dir = root.as_ref().to_path_buf();
        dir.extend(self.path_stubs());
        dir
    }

    /// `output_dir(root)/filename`.
    pub fn full_output_path(&self, root: impl AsRef<Path>, filename: &str) -> PathBuf {
        self.output_dir(root).join(filename)
    }

    /// One-line summary for logs.
    pub fn description(&self) -> String {
        format!(
            "{}: {} of {}, {}",
            self.repertoire, self.analysis, self.unit, self.modal_category
        )
    }

    /// Title for charts of this run.
    pub fn plot_title(&self) -> String {
        format!(
            "Mode {} ({}): {} of {} [{}]",
            self.modal_category.mode_number(),
            self.modal_category,
            self.analysis,
            self.unit,
            self.repertoire
        )
    }
}

impl fmt::Display for ResultDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_stubs().join("/"))
    }
}

/// Directory name recording the cutoff an export was made at, e.g. `p_cutoff_0.40`.
pub fn p_cutoff_path_stub(p_cutoff: f64) -> String {
    format!("p_cutoff_{p_cutoff:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ResultDescriptor {
        ResultDescriptor::new(
            "plainchant_sequences",
            AnalysisType::PcFreqs,
            Unit::PitchClass,
            ModalCategory::GAuthentic,
        )
    }

    #[test]
    fn paths_follow_stubs() {
        let d = descriptor();
        assert_eq!(
            d.path_stubs(),
            ["plainchant_sequences", "pc_freqs", "pcs", "authentic_modes", "G_authentic"]
        );
        assert_eq!(
            d.full_output_path("/out", "dendrogram.png"),
            PathBuf::from("/out/plainchant_sequences/pc_freqs/pcs/authentic_modes/G_authentic/dendrogram.png")
        );
        assert_eq!(d.to_string(), "plainchant_sequences/pc_freqs/pcs/authentic_modes/G_authentic");
    }

    #[test]
    fn titles() {
        let d = descriptor();
        assert_eq!(
            d.plot_title(),
            "Mode 7 (G authentic): relative frequencies of pitch classes [plainchant_sequences]"
        );
        assert_eq!(
            d.description(),
            "plainchant_sequences: relative frequencies of pitch classes, G authentic"
        );
    }

    #[test]
    fn cutoff_stub_has_two_decimals() {
        assert_eq!(p_cutoff_path_stub(0.4), "p_cutoff_0.40");
        assert_eq!(p_cutoff_path_stub(1.0), "p_cutoff_1.00");
        assert_eq!(p_cutoff_path_stub(0.0), "p_cutoff_0.00");
    }

    #[test]
    fn usable_as_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(descriptor(), 1);
        assert_eq!(map.get(&descriptor()), Some(&1));
        let other = ResultDescriptor {
            unit: Unit::ModeDegree,
            ..descriptor()
        };
        assert!(!map.contains_key(&other));
    }
}
