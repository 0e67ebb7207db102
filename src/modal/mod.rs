//! Grouping of analysis items by modal category.
//!
//! The eight church modes are identified by final and ambitus. A grouping
//! pass keeps one bucket per mode, in canonical order, including modes no
//! item belongs to, so "no data for this mode" is an empty bucket rather
//! than a missing key.

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::extract::{AnalysisItem, AnalysisType, Unit};

/// Modal classification of an item: final plus authentic/plagal ambitus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalCategory {
    /// Mode 1 (protus authentic).
    DAuthentic,
    /// Mode 2 (protus plagal).
    DPlagal,
    /// Mode 3 (deuterus authentic).
    EAuthentic,
    /// Mode 4 (deuterus plagal).
    EPlagal,
    /// Mode 5 (tritus authentic).
    FAuthentic,
    /// Mode 6 (tritus plagal).
    FPlagal,
    /// Mode 7 (tetrardus authentic).
    GAuthentic,
    /// Mode 8 (tetrardus plagal).
    GPlagal,
}

impl ModalCategory {
    /// All categories in canonical order.
    pub const ALL: [ModalCategory; 8] = [
        ModalCategory::DAuthentic,
        ModalCategory::DPlagal,
        ModalCategory::EAuthentic,
        ModalCategory::EPlagal,
        ModalCategory::FAuthentic,
        ModalCategory::FPlagal,
        ModalCategory::GAuthentic,
        ModalCategory::GPlagal,
    ];

    /// Pitch-class label of the final.
    pub fn final_label(self) -> &'static str {
        match self {
            ModalCategory::DAuthentic | ModalCategory::DPlagal => "D",
            ModalCategory::EAuthentic | ModalCategory::EPlagal => "E",
            ModalCategory::FAuthentic | ModalCategory::FPlagal => "F",
            ModalCategory::GAuthentic | ModalCategory::GPlagal => "G",
        }
    }

    /// True for the odd-numbered (authentic) modes.
    pub fn is_authentic(self) -> bool {
        (self as u8) % 2 == 0
    }

    /// Mode number, 1..=8.
    pub fn mode_number(self) -> u8 {
        self as u8 + 1
    }

    fn ambitus(self) -> &'static str {
        if self.is_authentic() {
            "authentic"
        } else {
            "plagal"
        }
    }

    /// Two directory names used by exporters, e.g. `authentic_modes/G_authentic`.
    pub fn output_path_stubs(self) -> (String, String) {
        (
            format!("{}_modes", self.ambitus()),
            format!("{}_{}", self.final_label(), self.ambitus()),
        )
    }
}

impl fmt::Display for ModalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.final_label(), self.ambitus())
    }
}

/// Items sharing one modal category.
#[derive(Debug)]
pub struct ModalBucket<'a, T> {
    category: ModalCategory,
    items: Vec<&'a T>,
}

// Manual impl: only references are cloned, `T` need not be `Clone`.
impl<T> Clone for ModalBucket<'_, T> {
    fn clone(&self) -> Self {
        Self {
            category: self.category,
            items: self.items.clone(),
        }
    }
}

impl<'a, T: AnalysisItem> ModalBucket<'a, T> {
    /// The bucket's category.
    pub fn category(&self) -> ModalCategory {
        self.category
    }

    /// Items in input order.
    pub fn items(&self) -> &[&'a T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no item has this category.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item name → distribution, ready for clustering.
    pub fn distributions(
        &self,
        analysis: AnalysisType,
        unit: Unit,
    ) -> Result<BTreeMap<String, Distribution>> {
        let mut out = BTreeMap::new();
        for item in &self.items {
            let dist = analysis.distribution(*item, unit)?;
            if out.insert(item.name().to_string(), dist).is_some() {
                return Err(Error::DuplicateItem {
                    name: item.name().to_string(),
                });
            }
        }
        Ok(out)
    }

    /// All items' distributions summed into one.
    pub fn total_distribution(&self, analysis: AnalysisType, unit: Unit) -> Result<Distribution> {
        let alphabet = analysis.kind(unit)?.alphabet();
        let parts = self
            .items
            .iter()
            .map(|item| analysis.distribution(*item, unit))
            .collect::<Result<Vec<_>>>()?;
        Distribution::sum(&alphabet, &parts)
    }
}

/// One bucket per modal category, in canonical order.
#[derive(Debug)]
pub struct ModalGrouping<'a, T> {
    buckets: Vec<ModalBucket<'a, T>>,
}

impl<'a, T: AnalysisItem> ModalGrouping<'a, T> {
    /// Partition `items` by their precomputed category.
    pub fn new(items: &'a [T]) -> Self {
        let mut buckets: Vec<ModalBucket<'a, T>> = ModalCategory::ALL
            .iter()
            .map(|&category| ModalBucket {
                category,
                items: Vec::new(),
            })
            .collect();
        for item in items {
            buckets[item.modal_category() as usize].items.push(item);
        }
        Self { buckets }
    }

    /// All buckets, including empty ones.
    pub fn buckets(&self) -> &[ModalBucket<'a, T>] {
        &self.buckets
    }

    /// Bucket for `category`.
    pub fn get(&self, category: ModalCategory) -> &ModalBucket<'a, T> {
        &self.buckets[category as usize]
    }

    /// Buckets with at least one item.
    pub fn non_empty(&self) -> impl Iterator<Item = &ModalBucket<'a, T>> {
        self.buckets.iter().filter(|b| !b.is_empty())
    }
}
