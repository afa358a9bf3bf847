use serde::Serialize;
use ts_rs::TS;

use csdh_core::models::category::RiskLevel;
use csdh_core::models::selection::Selection;
use csdh_score::dataset::ReferenceDataset;
use csdh_score::scoring::{assess, categorize};

use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::gauge::Gauge;
use crate::palette::{INACTIVE_BAR, RiskPalette};

pub const TITLE: &str = "CSDH Reoperation Risk Score";
pub const SUBTITLE: &str =
    "Predicting return to theatre after chronic subdural haematoma evacuation";

/// One risk-factor checkbox.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct FactorToggle {
    pub id: String,
    pub label: String,
    pub description: String,
    pub points: u32,
    pub selected: bool,
}

/// The headline result: score, category badge and estimated rate.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ScoreSummary {
    pub score: u32,
    pub display_max: u32,
    pub level: RiskLevel,
    pub category_label: String,
    pub category_range: String,
    pub rate: f64,
    pub events: u32,
    pub n: u32,
    /// Score as shown beside the cohort counts, `5+` in the top bucket.
    pub score_label: String,
    pub palette: RiskPalette,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct DistributionRow {
    pub label: String,
    pub rate: f64,
    pub n: u32,
    pub events: u32,
    /// Bar length relative to the largest score group.
    pub width_pct: f64,
    pub active: bool,
    pub level: RiskLevel,
    pub colour: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Distribution {
    pub total_n: u32,
    pub rows: Vec<DistributionRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct CategoryCard {
    pub level: RiskLevel,
    pub label: String,
    pub range: String,
    pub rate: f64,
    pub n: u32,
    pub events: u32,
    pub active: bool,
    pub palette: RiskPalette,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct MethodologyRow {
    pub label: String,
    /// `OR (95% CI)` cell.
    pub odds_ratio: String,
    pub p_value: String,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct MethodologyPanel {
    pub population: String,
    pub derivation: String,
    pub factors: Vec<MethodologyRow>,
    pub discrimination: String,
    pub calibration: String,
    pub clinical_note: String,
    pub overall_rate: f64,
}

/// Everything a host needs to draw the widget for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct WidgetView {
    pub title: String,
    pub subtitle: String,
    pub factors: Vec<FactorToggle>,
    pub summary: ScoreSummary,
    pub gauge: Gauge,
    pub distribution: Distribution,
    pub categories: Vec<CategoryCard>,
    pub methodology_open: bool,
    /// Present only while the panel is expanded.
    pub methodology: Option<MethodologyPanel>,
    pub footer: String,
}

impl WidgetView {
    pub fn build(
        selection: &Selection,
        methodology_open: bool,
        dataset: &ReferenceDataset,
        config: &WidgetConfig,
    ) -> Result<Self, WidgetError> {
        let display_max = config.display_max(dataset)?;
        let assessment = assess(selection, dataset);
        let palette = RiskPalette::for_level(assessment.level);

        let factors = dataset
            .factors()
            .iter()
            .map(|f| FactorToggle {
                id: f.id.clone(),
                label: f.label.clone(),
                description: f.description.clone(),
                points: f.points,
                selected: selection.is_selected(&f.id),
            })
            .collect();

        let summary = ScoreSummary {
            score: assessment.score,
            display_max,
            level: assessment.level,
            category_label: assessment.category.label.clone(),
            category_range: assessment.category.range.clone(),
            rate: assessment.risk.rate,
            events: assessment.risk.events,
            n: assessment.risk.n,
            score_label: assessment.score_label(),
            palette: palette.clone(),
        };

        let gauge = Gauge::new(
            &config.gauge,
            assessment.score,
            display_max,
            assessment.level,
            assessment.risk.rate,
            dataset.categories(),
        );

        let methodology = methodology_open.then(|| methodology_panel(dataset));

        Ok(Self {
            title: TITLE.to_string(),
            subtitle: SUBTITLE.to_string(),
            factors,
            summary,
            gauge,
            distribution: distribution(dataset, assessment.risk.score),
            categories: category_cards(dataset, assessment.level),
            methodology_open,
            methodology,
            footer: format!(
                "Derived from multicentre CSDH data (n = {}) · For research purposes only",
                dataset.performance().n
            ),
        })
    }
}

fn distribution(dataset: &ReferenceDataset, active_score: u32) -> Distribution {
    let max_n = dataset.risks().max_n().max(1) as f64;
    let rows = dataset
        .risks()
        .entries()
        .iter()
        .map(|entry| {
            let level = categorize(entry.score);
            let active = entry.score == active_score;
            DistributionRow {
                label: entry.display_label(),
                rate: entry.rate,
                n: entry.n,
                events: entry.events,
                width_pct: entry.n as f64 / max_n * 100.0,
                active,
                level,
                colour: if active {
                    RiskPalette::for_level(level).accent
                } else {
                    INACTIVE_BAR.to_string()
                },
            }
        })
        .collect();

    Distribution {
        total_n: dataset.performance().n,
        rows,
    }
}

fn category_cards(dataset: &ReferenceDataset, active: RiskLevel) -> Vec<CategoryCard> {
    dataset
        .categories()
        .iter()
        .map(|c| CategoryCard {
            level: c.level,
            label: c.label.clone(),
            range: c.range.clone(),
            rate: c.rate,
            n: c.n,
            events: c.events,
            active: c.level == active,
            palette: RiskPalette::for_level(c.level),
        })
        .collect()
}

fn methodology_panel(dataset: &ReferenceDataset) -> MethodologyPanel {
    let perf = dataset.performance();
    let overall_rate = perf.overall_rate();

    MethodologyPanel {
        population: format!(
            "{} patients with chronic subdural haematoma (CSDH) undergoing primary surgical \
             evacuation across {} hospitals. Overall reoperation rate: {:.1}% ({}/{}).",
            perf.n, perf.hospitals, overall_rate, perf.events, perf.n
        ),
        derivation: "Candidate predictors were screened through univariate analysis \
                     (chi-squared for categorical, Mann-Whitney U for continuous variables). \
                     Variables significant at p < 0.1 were entered into multivariable logistic \
                     regression. Integer score weights were assigned proportional to the beta \
                     coefficients, with the smallest coefficient (~0.3) mapped to 1 point."
            .to_string(),
        factors: dataset
            .factors()
            .iter()
            .map(|f| MethodologyRow {
                label: f.label.clone(),
                odds_ratio: f.odds_ratio_with_ci(),
                p_value: f.p_value.clone(),
                points: f.points,
            })
            .collect(),
        discrimination: format!(
            "Apparent AUC {}, {}-fold cross-validated AUC {}. Brier score {}.",
            perf.auc, perf.cv_folds, perf.auc_cv, perf.brier
        ),
        calibration: format!(
            "Hosmer-Lemeshow goodness-of-fit test p = {}, indicating no significant lack of \
             fit. Dual validation using both statsmodels and scikit-learn confirmed concordant \
             coefficient estimates (maximum prediction difference < 0.001).",
            perf.hl_p
        ),
        clinical_note: format!(
            "This score is derived from a multicentre retrospective cohort and has not been \
             externally validated. It is intended as a clinical adjunct to support \
             decision-making, not to replace clinical judgement. The moderate discriminatory \
             performance (AUC {:.2}) reflects the multifactorial nature of CSDH recurrence. \
             Prospective external validation is recommended before routine clinical use.",
            perf.auc_cv
        ),
        overall_rate,
    }
}
