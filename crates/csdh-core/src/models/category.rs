use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Risk stratum. Variants are declared in order of increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High];

    /// Position in [`RiskLevel::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate cohort statistics over one score band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskCategory {
    pub level: RiskLevel,
    pub label: String,
    /// Display form of the band, e.g. `2–3`.
    pub range: String,
    pub min_score: u32,
    /// Inclusive upper bound of the band.
    pub max_score: u32,
    pub rate: f64,
    pub n: u32,
    pub events: u32,
}

impl RiskCategory {
    pub fn contains(&self, score: u32) -> bool {
        (self.min_score..=self.max_score).contains(&score)
    }
}
