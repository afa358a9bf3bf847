use serde::{Deserialize, Serialize};
use ts_rs::TS;

use csdh_core::models::category::RiskLevel;

/// Neutral fill for inactive distribution bars.
pub const INACTIVE_BAR: &str = "#d0d0d0";

/// Hex colours used to draw one risk level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskPalette {
    /// Card and badge background.
    pub bg: String,
    pub border: String,
    pub text: String,
    /// Gauge arc, active bar and selected-factor highlight.
    pub accent: String,
}

impl RiskPalette {
    pub fn for_level(level: RiskLevel) -> Self {
        let (bg, border, text, accent) = match level {
            RiskLevel::Low => ("#e8f5e9", "#388e3c", "#1b5e20", "#4caf50"),
            RiskLevel::Moderate => ("#fff3e0", "#f57c00", "#e65100", "#ff9800"),
            RiskLevel::High => ("#ffebee", "#d32f2f", "#b71c1c", "#f44336"),
        };
        Self {
            bg: bg.to_string(),
            border: border.to_string(),
            text: text.to_string(),
            accent: accent.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_level_has_distinct_accent() {
        let accents: Vec<String> = RiskLevel::ALL
            .into_iter()
            .map(|l| RiskPalette::for_level(l).accent)
            .collect();
        assert_eq!(accents, ["#4caf50", "#ff9800", "#f44336"]);
    }
}
