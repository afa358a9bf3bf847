use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A binary clinical risk factor and its integer weight in the score.
///
/// `odds_ratio`, `ci` and `p_value` are the published multivariable
/// regression figures. They are carried for display and never enter the
/// score arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskFactor {
    pub id: String,
    pub label: String,
    pub description: String,
    pub points: u32,
    pub odds_ratio: String,
    pub ci: String,
    pub p_value: String,
}

impl RiskFactor {
    /// Odds ratio with its 95% CI, e.g. `2.06 (1.45–2.94)`.
    pub fn odds_ratio_with_ci(&self) -> String {
        format!("{} ({})", self.odds_ratio, self.ci)
    }
}
