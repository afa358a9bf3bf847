use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use csdh_core::models::category::{RiskCategory, RiskLevel};
use csdh_core::models::estimate::{RiskEstimate, RiskTable};
use csdh_core::models::factor::RiskFactor;
use csdh_core::models::selection::Selection;

use crate::dataset::ReferenceDataset;

/// Sum of `points` over every factor ticked in `selection`.
///
/// Ids in the selection that match no factor are ignored.
pub fn compute_score(selection: &Selection, factors: &[RiskFactor]) -> u32 {
    factors
        .iter()
        .filter(|f| selection.is_selected(&f.id))
        .map(|f| f.points)
        .sum()
}

/// Map a score onto its risk stratum: 0–1 low, 2–3 moderate, 4+ high.
pub fn categorize(score: u32) -> RiskLevel {
    match score {
        0..=1 => RiskLevel::Low,
        2..=3 => RiskLevel::Moderate,
        _ => RiskLevel::High,
    }
}

/// The risk estimate for `score`, collapsing scores past the open-ended
/// bucket onto it.
pub fn lookup_risk(score: u32, risks: &RiskTable) -> &RiskEstimate {
    let key = score.min(risks.top_score());
    // RiskTable is non-empty and contiguous from 0, so every key up to
    // top_score() is present.
    &risks.entries()[key as usize]
}

/// The aggregate record for `level`, if the table defines one.
pub fn category_rollup(level: RiskLevel, categories: &[RiskCategory]) -> Option<&RiskCategory> {
    categories.iter().find(|c| c.level == level)
}

/// Everything derived from one selection, recomputed from scratch.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Assessment {
    pub score: u32,
    pub max_score: u32,
    pub level: RiskLevel,
    pub category: RiskCategory,
    pub risk: RiskEstimate,
}

impl Assessment {
    /// The score as shown beside the risk estimate, e.g. `5+` for the
    /// open-ended bucket.
    pub fn score_label(&self) -> String {
        // `risk` is keyed by min(score, top), so only the top bucket differs.
        self.risk.display_label()
    }
}

pub fn assess(selection: &Selection, dataset: &ReferenceDataset) -> Assessment {
    let score = compute_score(selection, dataset.factors());
    let level = categorize(score);
    let risk = lookup_risk(score, dataset.risks());

    debug!(score, level = %level, rate = risk.rate, "assessment recomputed");

    Assessment {
        score,
        max_score: dataset.max_score(),
        level,
        category: dataset.category(level).clone(),
        risk: risk.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::csdh_reoperation;

    #[test]
    fn empty_selection_scores_zero() {
        let dataset = csdh_reoperation();
        assert_eq!(compute_score(&Selection::new(), dataset.factors()), 0);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let dataset = csdh_reoperation();
        let selection = Selection::from_ids(["gcs_low", "not_a_factor", "age_over_80"]);
        assert_eq!(compute_score(&selection, dataset.factors()), 1);
    }

    #[test]
    fn categorize_boundaries() {
        assert_eq!(categorize(0), RiskLevel::Low);
        assert_eq!(categorize(1), RiskLevel::Low);
        assert_eq!(categorize(2), RiskLevel::Moderate);
        assert_eq!(categorize(3), RiskLevel::Moderate);
        assert_eq!(categorize(4), RiskLevel::High);
        assert_eq!(categorize(8), RiskLevel::High);
        assert_eq!(categorize(u32::MAX), RiskLevel::High);
    }

    #[test]
    fn lookup_clamps_to_open_ended_bucket() {
        let risks = csdh_reoperation().risks();
        assert_eq!(lookup_risk(5, risks), lookup_risk(9, risks));
        assert_eq!(lookup_risk(u32::MAX, risks).label.as_deref(), Some("5+"));
        assert_eq!(lookup_risk(3, risks).rate, 17.9);
    }

    #[test]
    fn rollup_finds_each_level() {
        let categories = csdh_reoperation().categories();
        for level in RiskLevel::ALL {
            let category = category_rollup(level, categories).expect("every level is defined");
            assert_eq!(category.level, level);
        }
        assert!(category_rollup(RiskLevel::High, &[]).is_none());
    }

    #[test]
    fn score_label_marks_open_ended_bucket() {
        let dataset = csdh_reoperation();
        let all = Selection::from_ids(dataset.factors().iter().map(|f| f.id.as_str()));
        assert_eq!(assess(&all, dataset).score_label(), "5+");
        let one = Selection::from_ids(["walking_aid"]);
        assert_eq!(assess(&one, dataset).score_label(), "1");
    }
}
