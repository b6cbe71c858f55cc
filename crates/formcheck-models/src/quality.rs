//! Quality tiers for frames and reps.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score breakpoint for [`QualityCategory::Excellent`].
pub const EXCELLENT_THRESHOLD: f64 = 0.85;
/// Score breakpoint for [`QualityCategory::Good`].
pub const GOOD_THRESHOLD: f64 = 0.65;
/// Score breakpoint for [`QualityCategory::Fair`].
pub const FAIR_THRESHOLD: f64 = 0.40;

/// Four-tier quality classification, plus `Unknown` for unscoreable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum QualityCategory {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

impl QualityCategory {
    /// All categories, best first.
    pub const ALL: &'static [QualityCategory] = &[
        QualityCategory::Excellent,
        QualityCategory::Good,
        QualityCategory::Fair,
        QualityCategory::Poor,
        QualityCategory::Unknown,
    ];

    /// Classify a score against the fixed breakpoints.
    ///
    /// `None` and NaN map to `Unknown`.
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s.is_nan() => QualityCategory::Unknown,
            Some(s) if s >= EXCELLENT_THRESHOLD => QualityCategory::Excellent,
            Some(s) if s >= GOOD_THRESHOLD => QualityCategory::Good,
            Some(s) if s >= FAIR_THRESHOLD => QualityCategory::Fair,
            Some(_) => QualityCategory::Poor,
            None => QualityCategory::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityCategory::Excellent => "Excellent",
            QualityCategory::Good => "Good",
            QualityCategory::Fair => "Fair",
            QualityCategory::Poor => "Poor",
            QualityCategory::Unknown => "Unknown",
        }
    }

    /// Rank for ordering, 0 = best. `Unknown` ranks last.
    pub fn rank(&self) -> u8 {
        match self {
            QualityCategory::Excellent => 0,
            QualityCategory::Good => 1,
            QualityCategory::Fair => 2,
            QualityCategory::Poor => 3,
            QualityCategory::Unknown => 4,
        }
    }
}

impl fmt::Display for QualityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Histogram over quality categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryCounts {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
    pub unknown: usize,
}

impl CategoryCounts {
    /// Count one occurrence of `category`.
    pub fn record(&mut self, category: QualityCategory) {
        match category {
            QualityCategory::Excellent => self.excellent += 1,
            QualityCategory::Good => self.good += 1,
            QualityCategory::Fair => self.fair += 1,
            QualityCategory::Poor => self.poor += 1,
            QualityCategory::Unknown => self.unknown += 1,
        }
    }

    pub fn get(&self, category: QualityCategory) -> usize {
        match category {
            QualityCategory::Excellent => self.excellent,
            QualityCategory::Good => self.good,
            QualityCategory::Fair => self.fair,
            QualityCategory::Poor => self.poor,
            QualityCategory::Unknown => self.unknown,
        }
    }

    pub fn total(&self) -> usize {
        self.excellent + self.good + self.fair + self.poor + self.unknown
    }
}

impl FromIterator<QualityCategory> for CategoryCounts {
    fn from_iter<I: IntoIterator<Item = QualityCategory>>(iter: I) -> Self {
        let mut counts = CategoryCounts::default();
        for category in iter {
            counts.record(category);
        }
        counts
    }
}
