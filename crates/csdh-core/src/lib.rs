//! csdh-core
//!
//! Pure domain types for the CSDH reoperation risk score: risk factors,
//! per-score risk estimates, risk categories, model performance figures and
//! the per-session factor selection. The crate does no I/O. It is the shared
//! vocabulary of the scoring engine and the widget.

pub mod error;
pub mod models;
