use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Derivation-cohort size and validation statistics of the published model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModelPerformance {
    /// Apparent area under the ROC curve.
    pub auc: f64,
    /// Cross-validated AUC.
    pub auc_cv: f64,
    pub brier: f64,
    /// Hosmer-Lemeshow goodness-of-fit p-value.
    pub hl_p: f64,
    pub n: u32,
    pub events: u32,
    pub hospitals: u32,
    pub cv_folds: u32,
}

impl ModelPerformance {
    /// Overall reoperation rate in percent, rounded to one decimal.
    pub fn overall_rate(&self) -> f64 {
        if self.n == 0 {
            return 0.0;
        }
        round_one_decimal(self.events as f64 / self.n as f64 * 100.0)
    }
}

/// Round half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round_one_decimal(12.7617), 12.8);
        assert_eq!(round_one_decimal(7.56), 7.6);
        assert_eq!(round_one_decimal(3.04), 3.0);
    }

    #[test]
    fn empty_cohort_has_zero_rate() {
        let perf = ModelPerformance {
            auc: 0.5,
            auc_cv: 0.5,
            brier: 0.25,
            hl_p: 1.0,
            n: 0,
            events: 0,
            hospitals: 1,
            cv_folds: 10,
        };
        assert_eq!(perf.overall_rate(), 0.0);
    }
}
