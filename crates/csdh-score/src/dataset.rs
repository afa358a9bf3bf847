use std::collections::HashSet;
use std::sync::LazyLock;

use serde::Serialize;
use ts_rs::TS;

use csdh_core::error::CoreError;
use csdh_core::models::category::{RiskCategory, RiskLevel};
use csdh_core::models::estimate::{RiskEstimate, RiskTable};
use csdh_core::models::factor::RiskFactor;
use csdh_core::models::performance::ModelPerformance;

use crate::scoring::categorize;

/// Score key of the open-ended "5 or more" risk bucket.
pub const OPEN_ENDED_SCORE: u32 = 5;

/// The immutable reference tables behind the score.
///
/// Construction validates every cross-table invariant, so a value of this
/// type always satisfies them: unique factor ids with positive weights, a
/// risk table keyed `0..=OPEN_ENDED_SCORE`, and category bands that
/// partition `[0, max_score]` in agreement with [`categorize`].
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ReferenceDataset {
    factors: Vec<RiskFactor>,
    risks: RiskTable,
    categories: Vec<RiskCategory>,
    performance: ModelPerformance,
}

impl ReferenceDataset {
    pub fn new(
        factors: Vec<RiskFactor>,
        risks: RiskTable,
        mut categories: Vec<RiskCategory>,
        performance: ModelPerformance,
    ) -> Result<Self, CoreError> {
        validate_factors(&factors)?;

        if risks.top_score() != OPEN_ENDED_SCORE {
            return Err(CoreError::UnexpectedTopBucket {
                expected: OPEN_ENDED_SCORE,
                found: risks.top_score(),
            });
        }

        let max_score = factors
            .iter()
            .try_fold(0u32, |sum, f| sum.checked_add(f.points))
            .ok_or(CoreError::ScoreOverflow("sum of factor points"))?;
        validate_categories(&categories, max_score)?;
        categories.sort_by_key(|c| c.level);

        if performance.n == 0 {
            return Err(CoreError::EmptyPerformanceSample);
        }
        if performance.events > performance.n {
            return Err(CoreError::EventsExceedSample {
                table: "model performance",
                key: "overall".to_string(),
                events: performance.events,
                n: performance.n,
            });
        }

        Ok(Self {
            factors,
            risks,
            categories,
            performance,
        })
    }

    pub fn factors(&self) -> &[RiskFactor] {
        &self.factors
    }

    pub fn risks(&self) -> &RiskTable {
        &self.risks
    }

    /// Categories in order of increasing severity.
    pub fn categories(&self) -> &[RiskCategory] {
        &self.categories
    }

    pub fn performance(&self) -> &ModelPerformance {
        &self.performance
    }

    pub fn factor(&self, id: &str) -> Option<&RiskFactor> {
        self.factors.iter().find(|f| f.id == id)
    }

    /// The category record for `level`. Total: validation guarantees one
    /// record per level, stored in severity order.
    pub fn category(&self, level: RiskLevel) -> &RiskCategory {
        &self.categories[level.index()]
    }

    /// Highest attainable score: every factor selected. Construction rejects
    /// weights whose sum overflows, so the saturating fold is exact here.
    pub fn max_score(&self) -> u32 {
        self.factors
            .iter()
            .fold(0u32, |sum, f| sum.saturating_add(f.points))
    }
}

fn validate_factors(factors: &[RiskFactor]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for factor in factors {
        if factor.id.is_empty() {
            return Err(CoreError::EmptyFactorId);
        }
        if !seen.insert(factor.id.as_str()) {
            return Err(CoreError::DuplicateFactorId(factor.id.clone()));
        }
        if factor.points == 0 {
            return Err(CoreError::ZeroPoints {
                factor_id: factor.id.clone(),
            });
        }
    }
    Ok(())
}

fn validate_categories(categories: &[RiskCategory], max_score: u32) -> Result<(), CoreError> {
    for level in RiskLevel::ALL {
        match categories.iter().filter(|c| c.level == level).count() {
            0 => return Err(CoreError::MissingCategory(level)),
            1 => {}
            _ => return Err(CoreError::DuplicateCategory(level)),
        }
    }

    let mut bands: Vec<&RiskCategory> = categories.iter().collect();
    bands.sort_by_key(|c| c.min_score);

    let mut next = 0;
    for band in &bands {
        if band.max_score < band.min_score {
            return Err(CoreError::EmptyBand {
                level: band.level,
                min: band.min_score,
                max: band.max_score,
            });
        }
        if band.min_score != next {
            return Err(CoreError::BandGap {
                expected: next,
                found: band.min_score,
            });
        }
        if band.events > band.n {
            return Err(CoreError::EventsExceedSample {
                table: "risk category",
                key: band.level.to_string(),
                events: band.events,
                n: band.n,
            });
        }
        next = band
            .max_score
            .checked_add(1)
            .ok_or(CoreError::ScoreOverflow("risk category band end"))?;
    }

    let covered_to = next - 1;
    if covered_to != max_score {
        return Err(CoreError::BandCoverage {
            covered_to,
            max_score,
        });
    }

    // `categorize` is monotone, so agreement at both ends covers the band.
    for band in &bands {
        for score in [band.min_score, band.max_score] {
            let categorized = categorize(score);
            if categorized != band.level {
                return Err(CoreError::BandMismatch {
                    score,
                    band: band.level,
                    categorized,
                });
            }
        }
    }

    Ok(())
}

/// The published CSDH reoperation tables, built and validated once.
///
/// # Panics
///
/// Panics on first access if the built-in tables violate an invariant.
/// They are compile-time literals, so a panic indicates a table definition
/// bug rather than a runtime condition.
pub fn csdh_reoperation() -> &'static ReferenceDataset {
    static DATASET: LazyLock<ReferenceDataset> = LazyLock::new(|| {
        build_csdh_reoperation()
            .unwrap_or_else(|e| panic!("built-in CSDH reference tables are malformed: {e}"))
    });
    &DATASET
}

fn build_csdh_reoperation() -> Result<ReferenceDataset, CoreError> {
    let factors = [
        (
            "bilateral",
            "Bilateral operation",
            "Surgery performed on both sides",
            2,
            "2.06",
            "1.45–2.94",
            "<0.001",
        ),
        (
            "minicraniotomy",
            "Minicraniotomy",
            "Rather than burr hole drainage",
            2,
            "1.65",
            "1.08–2.52",
            "0.021",
        ),
        (
            "gcs_low",
            "Pre-operative GCS < 15",
            "Any reduction in consciousness level",
            1,
            "1.55",
            "1.11–2.15",
            "0.009",
        ),
        (
            "short_symptoms",
            "Symptom duration ≤ 3 days",
            "Acute or rapidly progressive presentation",
            1,
            "1.72",
            "1.24–2.39",
            "0.001",
        ),
        (
            "walking_aid",
            "Walking aid required",
            "Pre-morbid use of mobility aid",
            1,
            "1.39",
            "1.00–1.93",
            "0.051",
        ),
        (
            "antiplatelet",
            "Antiplatelet therapy",
            "Aspirin, clopidogrel, or similar",
            1,
            "1.34",
            "0.94–1.91",
            "0.109",
        ),
    ]
    .into_iter()
    .map(
        |(id, label, description, points, odds_ratio, ci, p_value)| RiskFactor {
            id: id.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            points,
            odds_ratio: odds_ratio.to_string(),
            ci: ci.to_string(),
            p_value: p_value.to_string(),
        },
    )
    .collect();

    let risks = RiskTable::new(
        [
            (0, 5.5, 289, 16),
            (1, 9.1, 386, 35),
            (2, 12.2, 393, 48),
            (3, 17.9, 234, 42),
            (4, 22.1, 163, 36),
            (5, 28.6, 63, 18),
        ]
        .into_iter()
        .map(|(score, rate, n, events)| RiskEstimate {
            score,
            rate,
            n,
            events,
            label: (score == OPEN_ENDED_SCORE).then(|| format!("{score}+")),
        })
        .collect(),
    )?;

    let categories = [
        (RiskLevel::Low, "Low", 0, 1, 7.6, 675, 51),
        (RiskLevel::Moderate, "Moderate", 2, 3, 14.4, 627, 90),
        (RiskLevel::High, "High", 4, 8, 23.9, 226, 54),
    ]
    .into_iter()
    .map(
        |(level, label, min_score, max_score, rate, n, events)| RiskCategory {
            level,
            label: label.to_string(),
            range: format!("{min_score}–{max_score}"),
            min_score,
            max_score,
            rate,
            n,
            events,
        },
    )
    .collect();

    let performance = ModelPerformance {
        auc: 0.653,
        auc_cv: 0.642,
        brier: 0.108,
        hl_p: 0.985,
        n: 1528,
        events: 195,
        hospitals: 6,
        cv_folds: 10,
    };

    ReferenceDataset::new(factors, risks, categories, performance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor(id: &str, points: u32) -> RiskFactor {
        RiskFactor {
            id: id.to_string(),
            label: id.to_string(),
            description: String::new(),
            points,
            odds_ratio: "1.00".to_string(),
            ci: "1.00–1.00".to_string(),
            p_value: "1.000".to_string(),
        }
    }

    fn band(level: RiskLevel, min_score: u32, max_score: u32) -> RiskCategory {
        RiskCategory {
            level,
            label: level.to_string(),
            range: format!("{min_score}–{max_score}"),
            min_score,
            max_score,
            rate: 10.0,
            n: 100,
            events: 10,
        }
    }

    fn standard_bands() -> Vec<RiskCategory> {
        vec![
            band(RiskLevel::Low, 0, 1),
            band(RiskLevel::Moderate, 2, 3),
            band(RiskLevel::High, 4, 8),
        ]
    }

    #[test]
    fn builtin_tables_are_valid() {
        let dataset = build_csdh_reoperation().expect("built-in tables should validate");
        assert_eq!(dataset.factors().len(), 6);
        assert_eq!(dataset.risks().entries().len(), 6);
        assert_eq!(dataset.categories().len(), 3);
    }

    #[test]
    fn rejects_duplicate_factor_ids() {
        let err = validate_factors(&[factor("a", 1), factor("a", 2)]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateFactorId(id) if id == "a"));
    }

    #[test]
    fn rejects_zero_point_factor() {
        let err = validate_factors(&[factor("a", 0)]).unwrap_err();
        assert!(matches!(err, CoreError::ZeroPoints { factor_id } if factor_id == "a"));
    }

    #[test]
    fn rejects_empty_factor_id() {
        assert!(matches!(
            validate_factors(&[factor("", 1)]),
            Err(CoreError::EmptyFactorId)
        ));
    }

    #[test]
    fn accepts_partitioning_bands() {
        validate_categories(&standard_bands(), 8).expect("bands should partition [0, 8]");
    }

    #[test]
    fn rejects_missing_category() {
        let bands = vec![band(RiskLevel::Low, 0, 3), band(RiskLevel::High, 4, 8)];
        assert!(matches!(
            validate_categories(&bands, 8),
            Err(CoreError::MissingCategory(RiskLevel::Moderate))
        ));
    }

    #[test]
    fn rejects_gap_between_bands() {
        let bands = vec![
            band(RiskLevel::Low, 0, 1),
            band(RiskLevel::Moderate, 3, 3),
            band(RiskLevel::High, 4, 8),
        ];
        assert!(matches!(
            validate_categories(&bands, 8),
            Err(CoreError::BandGap {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn rejects_overlapping_bands() {
        let bands = vec![
            band(RiskLevel::Low, 0, 2),
            band(RiskLevel::Moderate, 2, 3),
            band(RiskLevel::High, 4, 8),
        ];
        assert!(matches!(
            validate_categories(&bands, 8),
            Err(CoreError::BandGap {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn rejects_bands_short_of_max_score() {
        let bands = vec![
            band(RiskLevel::Low, 0, 1),
            band(RiskLevel::Moderate, 2, 3),
            band(RiskLevel::High, 4, 7),
        ];
        assert!(matches!(
            validate_categories(&bands, 8),
            Err(CoreError::BandCoverage {
                covered_to: 7,
                max_score: 8
            })
        ));
    }

    #[test]
    fn rejects_bands_disagreeing_with_thresholds() {
        let bands = vec![
            band(RiskLevel::Low, 0, 2),
            band(RiskLevel::Moderate, 3, 3),
            band(RiskLevel::High, 4, 8),
        ];
        assert!(matches!(
            validate_categories(&bands, 8),
            Err(CoreError::BandMismatch {
                score: 2,
                band: RiskLevel::Low,
                categorized: RiskLevel::Moderate
            })
        ));
    }

    #[test]
    fn rejects_factor_points_that_overflow() {
        let dataset = csdh_reoperation();
        let mut factors = dataset.factors().to_vec();
        factors[0].points = u32::MAX;
        let err = ReferenceDataset::new(
            factors,
            dataset.risks().clone(),
            dataset.categories().to_vec(),
            dataset.performance().clone(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::ScoreOverflow("sum of factor points")));
    }

    #[test]
    fn rejects_band_ending_at_u32_max() {
        let dataset = csdh_reoperation();
        let bands = vec![
            band(RiskLevel::Low, 0, 1),
            band(RiskLevel::Moderate, 2, 3),
            band(RiskLevel::High, 4, u32::MAX),
        ];
        let err = ReferenceDataset::new(
            dataset.factors().to_vec(),
            dataset.risks().clone(),
            bands,
            dataset.performance().clone(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::ScoreOverflow("risk category band end")));
    }

    #[test]
    fn rejects_risk_table_without_open_ended_bucket() {
        let risks = RiskTable::new(
            (0..4)
                .map(|score| RiskEstimate {
                    score,
                    rate: 1.0,
                    n: 10,
                    events: 1,
                    label: None,
                })
                .collect(),
        )
        .unwrap();
        let performance = csdh_reoperation().performance().clone();
        let factors = vec![factor("a", 2), factor("b", 2), factor("c", 4)];
        let err = ReferenceDataset::new(factors, risks, standard_bands(), performance).unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnexpectedTopBucket {
                expected: 5,
                found: 3
            }
        ));
    }
}
