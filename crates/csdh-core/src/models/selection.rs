use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Which risk factors are ticked in the current session, keyed by factor id.
///
/// Absent ids count as unselected. Two selections are equal when they tick
/// the same ids, regardless of explicit `false` entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Selection(BTreeMap<String, bool>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection with every id in `ids` ticked.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(|id| (id.into(), true)).collect())
    }

    /// Parse a host-supplied JSON object such as `{"bilateral": true}`.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Flip one factor and return its new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        let now = !self.is_selected(id);
        self.set(id, now);
        now
    }

    pub fn set(&mut self, id: &str, selected: bool) {
        if selected {
            self.0.insert(id.to_string(), true);
        } else {
            self.0.remove(id);
        }
    }

    /// Ticked ids in lexical order.
    pub fn selected_ids(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(id, _)| id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.selected_ids().next().is_none()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.selected_ids().eq(other.selected_ids())
    }
}

impl Eq for Selection {}
