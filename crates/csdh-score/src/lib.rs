//! csdh-score
//!
//! The CSDH reoperation risk score: the published reference tables and the
//! pure scoring engine over them. Pure data and arithmetic, no rendering.
//!
//! ```
//! use csdh_core::models::category::RiskLevel;
//! use csdh_core::models::selection::Selection;
//!
//! let dataset = csdh_score::dataset::csdh_reoperation();
//! let selection = Selection::from_ids(["bilateral", "minicraniotomy"]);
//! let assessment = csdh_score::scoring::assess(&selection, dataset);
//! assert_eq!(assessment.score, 4);
//! assert_eq!(assessment.level, RiskLevel::High);
//! assert_eq!(assessment.risk.rate, 22.1);
//! ```

pub mod dataset;
pub mod scoring;
