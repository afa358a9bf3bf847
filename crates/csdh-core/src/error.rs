use thiserror::Error;

use crate::models::category::RiskLevel;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("risk factor id must not be empty")]
    EmptyFactorId,

    #[error("duplicate risk factor id: {0}")]
    DuplicateFactorId(String),

    #[error("risk factor '{factor_id}' must carry at least one point")]
    ZeroPoints { factor_id: String },

    #[error("risk table must not be empty")]
    EmptyRiskTable,

    #[error("risk table keys must be contiguous from 0: expected {expected}, found {found}")]
    NonContiguousRiskKey { expected: u32, found: u32 },

    #[error("risk table top bucket must be {expected}, found {found}")]
    UnexpectedTopBucket { expected: u32, found: u32 },

    #[error("{table} entry '{key}' reports {events} events out of {n}")]
    EventsExceedSample {
        table: &'static str,
        key: String,
        events: u32,
        n: u32,
    },

    #[error("risk category '{0}' is defined more than once")]
    DuplicateCategory(RiskLevel),

    #[error("risk category '{0}' is missing")]
    MissingCategory(RiskLevel),

    #[error("risk category '{level}' has an empty band [{min}, {max}]")]
    EmptyBand { level: RiskLevel, min: u32, max: u32 },

    #[error("risk category bands must be contiguous: expected a band starting at {expected}, found {found}")]
    BandGap { expected: u32, found: u32 },

    #[error("risk category bands end at {covered_to} but scores reach {max_score}")]
    BandCoverage { covered_to: u32, max_score: u32 },

    #[error("score {score} falls in the '{band}' band but categorizes as '{categorized}'")]
    BandMismatch {
        score: u32,
        band: RiskLevel,
        categorized: RiskLevel,
    },

    #[error("{0} overflows the score range")]
    ScoreOverflow(&'static str),

    #[error("model performance sample size must be positive")]
    EmptyPerformanceSample,
}
