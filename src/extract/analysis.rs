//! Analysis types and the units they are computed in.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{AnalysisItem, ModeDegree};
use crate::distribution::{Distribution, DistributionKind};
use crate::error::{Error, Result};

/// The unit in which melodic events are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Absolute pitch classes.
    PitchClass,
    /// Degrees relative to the final.
    ModeDegree,
}

impl Unit {
    /// All units in canonical order.
    pub const ALL: [Unit; 2] = [Unit::PitchClass, Unit::ModeDegree];

    /// Short machine name.
    pub fn name(self) -> &'static str {
        match self {
            Unit::PitchClass => "pitch_class",
            Unit::ModeDegree => "mode_degree",
        }
    }

    /// Directory name used by exporters.
    pub fn output_path_stub(self) -> &'static str {
        match self {
            Unit::PitchClass => "pcs",
            Unit::ModeDegree => "mode_degrees",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unit::PitchClass => "pitch classes",
            Unit::ModeDegree => "mode degrees",
        })
    }
}

/// What is measured for each analysis item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    /// Relative frequency of each pitch class or mode degree.
    PcFreqs,
    /// Relative frequency of each directed leap of a fifth.
    LeapsL5,
    /// Where each pitch class or mode degree moves next: conditional
    /// probabilities of the following symbol, one row per source symbol.
    Tendency,
}

impl AnalysisType {
    /// Short machine name.
    pub fn name(self) -> &'static str {
        match self {
            AnalysisType::PcFreqs => "pc_freqs",
            AnalysisType::LeapsL5 => "leaps_l5",
            AnalysisType::Tendency => "tendency",
        }
    }

    /// Directory name used by exporters.
    pub fn output_path_stub(self) -> &'static str {
        self.name()
    }

    /// Whether this analysis is defined for `unit`.
    pub fn supports(self, unit: Unit) -> bool {
        self.kind(unit).is_ok()
    }

    /// The distribution kind this analysis produces in `unit`.
    pub fn kind(self, unit: Unit) -> Result<DistributionKind> {
        match (self, unit) {
            (AnalysisType::PcFreqs, Unit::PitchClass) => Ok(DistributionKind::PitchClass),
            (AnalysisType::PcFreqs, Unit::ModeDegree) => Ok(DistributionKind::ModeDegree),
            (AnalysisType::LeapsL5, Unit::PitchClass) => Ok(DistributionKind::LeapL5),
            (AnalysisType::Tendency, Unit::PitchClass) => Ok(DistributionKind::PitchClassTendency),
            (AnalysisType::Tendency, Unit::ModeDegree) => Ok(DistributionKind::ModeDegreeTendency),
            (AnalysisType::LeapsL5, Unit::ModeDegree) => Err(Error::UnsupportedUnit {
                analysis: self.name(),
                unit: unit.name(),
            }),
        }
    }

    /// Symbols of `item` this analysis counts in `unit`.
    pub fn symbols<T: AnalysisItem + ?Sized>(self, item: &T, unit: Unit) -> Result<Vec<String>> {
        Ok(match self.kind(unit)? {
            DistributionKind::PitchClass => item.pitch_classes(),
            DistributionKind::ModeDegree => item.mode_degrees(),
            DistributionKind::LeapL5 => item
                .note_pairs()
                .into_iter()
                .filter(|p| p.is_leap_of_fifth())
                .map(|p| p.label())
                .collect(),
            // Repeated notes say nothing about direction and are skipped.
            DistributionKind::PitchClassTendency => item
                .note_pairs()
                .into_iter()
                .filter(|p| p.semitones() != 0)
                .map(|p| p.label())
                .collect(),
            DistributionKind::ModeDegreeTendency => match item.note_of_final() {
                Some(base) => item
                    .note_pairs()
                    .into_iter()
                    .filter(|p| p.semitones() != 0)
                    .map(|p| {
                        format!(
                            "{}_{}",
                            ModeDegree::from_note_pair(&p.0, base).label(),
                            ModeDegree::from_note_pair(&p.1, base).label()
                        )
                    })
                    .collect(),
                None => Vec::new(),
            },
        })
    }

    /// Count distribution of `item`; the analysis function fed to the clustering engine.
    pub fn distribution<T: AnalysisItem + ?Sized>(self, item: &T, unit: Unit) -> Result<Distribution> {
        let alphabet = self.kind(unit)?.alphabet();
        Distribution::from_symbols(&alphabet, self.symbols(item, unit)?)
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnalysisType::PcFreqs => "relative frequencies",
            AnalysisType::LeapsL5 => "leaps of a fifth",
            AnalysisType::Tendency => "tendencies",
        })
    }
}
