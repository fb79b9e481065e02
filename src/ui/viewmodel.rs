//! View model of the current marks and modes.
//!
//! Computed from a [`StateStore`] snapshot and consumed by the
//! [`renderer`](super::renderer). Holds display-ready data only.

use crate::app::StateStore;
use crate::domain::Mark;
use crate::storage::{ExclusionSettings, KeyValueStore};

/// One marked item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedItem {
    pub relative: String,
    pub mark: Mark,
}

/// Everything the status view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusViewModel {
    pub roots: Vec<String>,
    pub hide_mode: bool,
    pub focus_mode: bool,
    /// Hidden items first, then focused items, each in insertion order.
    pub items: Vec<MarkedItem>,
    pub managed_exclusions: usize,
}

impl StatusViewModel {
    #[must_use]
    pub fn from_state<S: KeyValueStore, X: ExclusionSettings>(state: &StateStore<S, X>) -> Self {
        let hidden = state.hidden().into_iter().map(|relative| MarkedItem {
            relative,
            mark: Mark::Hidden,
        });
        let focused = state.focused().into_iter().map(|relative| MarkedItem {
            relative,
            mark: Mark::Focused,
        });

        Self {
            roots: state
                .workspace()
                .roots()
                .iter()
                .map(|r| r.display().to_string())
                .collect(),
            hide_mode: state.hide_mode(),
            focus_mode: state.focus_mode(),
            items: hidden.chain(focused).collect(),
            managed_exclusions: state.managed_exclusions().len(),
        }
    }
}
