use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Observed reoperation rate among derivation-cohort patients at one score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskEstimate {
    pub score: u32,
    /// Reported percentage. Not recomputed from `events / n`.
    pub rate: f64,
    pub n: u32,
    pub events: u32,
    /// Display override for the open-ended top bucket ("5+").
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}

impl RiskEstimate {
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.score.to_string())
    }
}

/// Risk estimates keyed by score, contiguous from 0.
///
/// The last entry is the open-ended bucket: scores beyond it collapse onto it.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct RiskTable(Vec<RiskEstimate>);

impl RiskTable {
    pub fn new(entries: Vec<RiskEstimate>) -> Result<Self, CoreError> {
        if entries.is_empty() {
            return Err(CoreError::EmptyRiskTable);
        }
        for (expected, entry) in (0u32..).zip(&entries) {
            if entry.score != expected {
                return Err(CoreError::NonContiguousRiskKey {
                    expected,
                    found: entry.score,
                });
            }
            if entry.events > entry.n {
                return Err(CoreError::EventsExceedSample {
                    table: "risk table",
                    key: entry.score.to_string(),
                    events: entry.events,
                    n: entry.n,
                });
            }
        }
        Ok(Self(entries))
    }

    /// Key of the open-ended bucket.
    pub fn top_score(&self) -> u32 {
        // Non-empty and contiguous from 0, so the last key is len - 1.
        (self.0.len() - 1) as u32
    }

    pub fn get(&self, score: u32) -> Option<&RiskEstimate> {
        self.0.get(score as usize)
    }

    pub fn entries(&self) -> &[RiskEstimate] {
        &self.0
    }

    /// Largest per-score sample size, used to scale distribution bars.
    pub fn max_n(&self) -> u32 {
        self.0.iter().map(|e| e.n).max().unwrap_or(0)
    }
}
