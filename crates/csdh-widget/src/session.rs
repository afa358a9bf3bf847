use tracing::{debug, warn};

use csdh_core::models::selection::Selection;
use csdh_score::dataset::{ReferenceDataset, csdh_reoperation};
use csdh_score::scoring::{Assessment, assess};

use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::view::WidgetView;

/// Interaction state of one open widget.
///
/// Holds the ticked factors and whether the methodology panel is expanded.
/// Lives only as long as the widget is open; nothing here is persisted.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    dataset: &'a ReferenceDataset,
    selection: Selection,
    methodology_open: bool,
}

impl Default for Session<'static> {
    fn default() -> Self {
        Self::new(csdh_reoperation())
    }
}

impl<'a> Session<'a> {
    pub fn new(dataset: &'a ReferenceDataset) -> Self {
        Self {
            dataset,
            selection: Selection::new(),
            methodology_open: false,
        }
    }

    pub fn dataset(&self) -> &'a ReferenceDataset {
        self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn methodology_open(&self) -> bool {
        self.methodology_open
    }

    /// Flip one risk factor and return whether it is now ticked.
    pub fn toggle_factor(&mut self, id: &str) -> Result<bool, WidgetError> {
        if self.dataset.factor(id).is_none() {
            warn!(factor_id = id, "rejected toggle of unknown risk factor");
            return Err(WidgetError::UnknownFactor(id.to_string()));
        }
        let selected = self.selection.toggle(id);
        debug!(factor_id = id, selected, "risk factor toggled");
        Ok(selected)
    }

    /// Expand or collapse the methodology panel and return the new state.
    pub fn toggle_methodology(&mut self) -> bool {
        self.methodology_open = !self.methodology_open;
        debug!(open = self.methodology_open, "methodology panel toggled");
        self.methodology_open
    }

    pub fn assessment(&self) -> Assessment {
        assess(&self.selection, self.dataset)
    }

    pub fn view(&self, config: &WidgetConfig) -> Result<WidgetView, WidgetError> {
        WidgetView::build(&self.selection, self.methodology_open, self.dataset, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csdh_core::models::category::RiskLevel;

    #[test]
    fn starts_empty_and_collapsed() {
        let session = Session::default();
        assert!(session.selection().is_empty());
        assert!(!session.methodology_open());
        assert_eq!(session.assessment().score, 0);
    }

    #[test]
    fn toggles_recompute_assessment() {
        let mut session = Session::default();
        assert!(session.toggle_factor("bilateral").unwrap());
        assert!(session.toggle_factor("minicraniotomy").unwrap());
        let assessment = session.assessment();
        assert_eq!(assessment.score, 4);
        assert_eq!(assessment.level, RiskLevel::High);

        assert!(!session.toggle_factor("bilateral").unwrap());
        assert_eq!(session.assessment().score, 2);
        assert_eq!(session.assessment().level, RiskLevel::Moderate);
    }

    #[test]
    fn rejects_unknown_factor() {
        let mut session = Session::default();
        let err = session.toggle_factor("age_over_80").unwrap_err();
        assert!(matches!(err, WidgetError::UnknownFactor(id) if id == "age_over_80"));
        assert!(session.selection().is_empty());
    }

    #[test]
    fn methodology_toggle_controls_panel() {
        let mut session = Session::default();
        let config = WidgetConfig::default();
        assert!(session.view(&config).unwrap().methodology.is_none());
        assert!(session.toggle_methodology());
        assert!(session.view(&config).unwrap().methodology.is_some());
        assert!(!session.toggle_methodology());
        assert!(session.view(&config).unwrap().methodology.is_none());
    }
}
