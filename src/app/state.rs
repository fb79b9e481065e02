//! The State Store: marked items, mode flags and exclusion upkeep.
//!
//! [`StateStore`] owns the two persistence ports and is the only writer of
//! the keys listed in [`crate::storage::keys`]. Every mutation follows the
//! same sequence:
//!
//! ```text
//! resolve path → update lists → persist → recompute exclusions → notify
//! ```
//!
//! Marked items are read back from the key-value store on each access so the
//! store stays the single source of truth; the two mode flags are cached
//! after construction.
//!
//! # Example
//!
//! ```rust
//! use treefocus::app::{Outcome, StateStore};
//! use treefocus::infrastructure::Workspace;
//! use treefocus::storage::{MemorySettings, MemoryStore};
//! use std::path::PathBuf;
//!
//! let workspace = Workspace::new([PathBuf::from("/code/app")]);
//! let mut state = StateStore::new(MemoryStore::new(), MemorySettings::new(), workspace);
//!
//! let outcome = state.toggle_hide(&PathBuf::from("/code/app/build"))?;
//! assert_eq!(outcome, Outcome::Applied);
//! assert_eq!(state.hidden(), vec!["build"]);
//! # Ok::<(), treefocus::TreeFocusError>(())
//! ```

use super::exclusions::{self, Recomputation};
use super::modes::{Mode, Modes};
use super::notify::{Notification, Notifier};
use crate::domain::error::Result;
use crate::domain::Mark;
use crate::infrastructure::Workspace;
use crate::storage::{keys, ExclusionSettings, KeyValueStore, KeyValueStoreExt};
use std::path::Path;
use std::sync::mpsc::Receiver;

/// What a mutation did, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed and was persisted.
    Applied,
    /// Nothing to do: no path given, path outside every project root, or
    /// the item was already in the requested state.
    Unchanged,
}

/// Marked items and mode flags for one workspace.
pub struct StateStore<S, X> {
    store: S,
    settings: X,
    workspace: Workspace,
    modes: Modes,
    notifier: Notifier,
}

impl<S: KeyValueStore, X: ExclusionSettings> StateStore<S, X> {
    /// Creates a State Store, loading the persisted mode flags.
    ///
    /// Absent keys default to off / empty.
    pub fn new(store: S, settings: X, workspace: Workspace) -> Self {
        let modes = Modes {
            hide: store.get_or(keys::HIDE_MODE, false),
            focus: store.get_or(keys::FOCUS_MODE, false),
        };

        tracing::debug!(
            hide_mode = modes.hide,
            focus_mode = modes.focus,
            roots = workspace.roots().len(),
            "state store loaded"
        );

        Self {
            store,
            settings,
            workspace,
            modes,
            notifier: Notifier::default(),
        }
    }

    #[must_use]
    pub const fn hide_mode(&self) -> bool {
        self.modes.hide
    }

    #[must_use]
    pub const fn focus_mode(&self) -> bool {
        self.modes.focus
    }

    #[must_use]
    pub const fn modes(&self) -> Modes {
        self.modes
    }

    #[must_use]
    pub const fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Snapshot of the hidden items.
    #[must_use]
    pub fn hidden(&self) -> Vec<String> {
        self.store.get_or(keys::HIDDEN_ITEMS, Vec::new())
    }

    /// Snapshot of the focused items.
    #[must_use]
    pub fn focused(&self) -> Vec<String> {
        self.store.get_or(keys::FOCUSED_ITEMS, Vec::new())
    }

    /// Keys written into the exclusion mapping by the last recomputation.
    #[must_use]
    pub fn managed_exclusions(&self) -> Vec<String> {
        self.store.get_or(keys::MANAGED_EXCLUSIONS, Vec::new())
    }

    /// The mark carried by a root-relative path, hidden checked first.
    #[must_use]
    pub fn mark_of(&self, relative: &str) -> Option<Mark> {
        if self.hidden().iter().any(|h| h == relative) {
            Some(Mark::Hidden)
        } else if self.focused().iter().any(|f| f == relative) {
            Some(Mark::Focused)
        } else {
            None
        }
    }

    /// Current value of both UI-visibility flags.
    #[must_use]
    pub const fn context_flags(&self) -> [(&'static str, bool); 2] {
        [
            (Mode::Hide.context_key(), self.modes.hide),
            (Mode::Focus.context_key(), self.modes.focus),
        ]
    }

    /// Registers a receiver for change notifications.
    pub fn subscribe(&mut self) -> Receiver<Notification> {
        self.notifier.subscribe()
    }

    /// Publishes both UI-visibility flags, typically once at start-up.
    pub fn sync_context(&mut self) {
        for (key, value) in self.context_flags() {
            self.notifier.notify(&Notification::ContextChanged { key, value });
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn settings(&self) -> &X {
        &self.settings
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn settings_mut(&mut self) -> &mut X {
        &mut self.settings
    }

    /// Toggles the hidden mark on an absolute path.
    ///
    /// Marking an item hidden clears its focused mark.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the lists or the exclusions fails.
    pub fn toggle_hide(&mut self, path: &Path) -> Result<Outcome> {
        self.toggle(path, Mark::Hidden)
    }

    /// Toggles the focused mark on an absolute path.
    ///
    /// Marking an item focused clears its hidden mark.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the lists or the exclusions fails.
    pub fn toggle_focus(&mut self, path: &Path) -> Result<Outcome> {
        self.toggle(path, Mark::Focused)
    }

    fn toggle(&mut self, path: &Path, mark: Mark) -> Result<Outcome> {
        let _span = tracing::debug_span!("toggle", path = %path.display(), ?mark).entered();

        let Some(resolved) = self.workspace.resolve(path) else {
            tracing::debug!("path outside every project root, ignoring");
            return Ok(Outcome::Unchanged);
        };
        let relative = resolved.relative;

        let (own_key, other_key) = match mark {
            Mark::Hidden => (keys::HIDDEN_ITEMS, keys::FOCUSED_ITEMS),
            Mark::Focused => (keys::FOCUSED_ITEMS, keys::HIDDEN_ITEMS),
        };
        let mut own: Vec<String> = self.store.get_or(own_key, Vec::new());
        let mut other: Vec<String> = self.store.get_or(other_key, Vec::new());

        if own.contains(&relative) {
            own.retain(|item| item != &relative);
            tracing::debug!(relative = %relative, "mark removed");
        } else {
            own.push(relative.clone());
            other.retain(|item| item != &relative);
            tracing::debug!(relative = %relative, "mark added");
        }

        // Removal side first: a failure in between never leaves the item
        // in both lists.
        self.store.put(other_key, &other)?;
        self.store.put(own_key, &own)?;
        self.after_marks_changed(path)?;
        Ok(Outcome::Applied)
    }

    /// Removes any mark from an absolute path.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the lists or the exclusions fails.
    pub fn reset(&mut self, path: &Path) -> Result<Outcome> {
        let _span = tracing::debug_span!("reset", path = %path.display()).entered();

        let Some(resolved) = self.workspace.resolve(path) else {
            tracing::debug!("path outside every project root, ignoring");
            return Ok(Outcome::Unchanged);
        };
        let relative = resolved.relative;

        let mut hidden = self.hidden();
        let mut focused = self.focused();
        let before = hidden.len() + focused.len();
        hidden.retain(|item| item != &relative);
        focused.retain(|item| item != &relative);

        if hidden.len() + focused.len() == before {
            tracing::debug!(relative = %relative, "item carries no mark");
            return Ok(Outcome::Unchanged);
        }

        self.store.put(keys::FOCUSED_ITEMS, &focused)?;
        self.store.put(keys::HIDDEN_ITEMS, &hidden)?;
        self.after_marks_changed(path)?;
        Ok(Outcome::Applied)
    }

    fn after_marks_changed(&mut self, path: &Path) -> Result<()> {
        if self.modes.any() {
            self.recompute_exclusions()?;
        }
        self.notifier
            .notify(&Notification::DecorationsChanged(Some(path.to_path_buf())));
        Ok(())
    }

    /// Turns hide mode on or off.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the flag or the exclusions fails.
    pub fn set_hide_mode(&mut self, value: bool) -> Result<Outcome> {
        self.set_mode(Mode::Hide, value)
    }

    /// Turns focus mode on or off.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the flag or the exclusions fails.
    pub fn set_focus_mode(&mut self, value: bool) -> Result<Outcome> {
        self.set_mode(Mode::Focus, value)
    }

    /// Sets a mode flag, persists it and always recomputes, so switching a
    /// mode off retracts the exclusions it contributed.
    fn set_mode(&mut self, mode: Mode, value: bool) -> Result<Outcome> {
        let _span = tracing::debug_span!("set_mode", ?mode, value).entered();

        self.store.put(mode.state_key(), &value)?;
        self.modes.set(mode, value);
        self.recompute_exclusions()?;

        self.notifier.notify(&Notification::ContextChanged {
            key: mode.context_key(),
            value,
        });
        tracing::info!(?mode, value, "mode updated");
        Ok(Outcome::Applied)
    }

    /// Recomputes exclusions on demand, for example after the tree changed
    /// on disk while focus mode is on.
    ///
    /// # Errors
    ///
    /// Returns an error if the exclusions cannot be read or written.
    pub fn refresh(&mut self) -> Result<Outcome> {
        let before = self.settings.read_exclusions()?;
        let after = self.recompute_exclusions()?;
        if before == after.exclusions {
            Ok(Outcome::Unchanged)
        } else {
            self.notifier.notify(&Notification::DecorationsChanged(None));
            Ok(Outcome::Applied)
        }
    }

    /// Rebuilds the exclusion mapping from the current marks and modes.
    ///
    /// Entries written by the previous pass are retracted first; entries the
    /// user configured independently are carried over. The managed record
    /// is widened to cover both passes before the mapping is written and
    /// narrowed to this pass's keys afterwards, so a failed write is
    /// retracted by the next successful one.
    ///
    /// # Errors
    ///
    /// Returns an error if the exclusions cannot be read or either write fails.
    pub fn recompute_exclusions(&mut self) -> Result<Recomputation> {
        let _span = tracing::debug_span!("recompute_exclusions",
            hide_mode = self.modes.hide,
            focus_mode = self.modes.focus
        ).entered();

        let hidden = self.hidden();
        let focused = self.focused();
        let current = self.settings.read_exclusions()?;
        let previously_managed = self.managed_exclusions();

        let result = exclusions::recompute(
            self.workspace.roots(),
            self.modes,
            &hidden,
            &focused,
            current,
            &previously_managed,
        );

        // Until the settings write lands, both the old and the new keys may
        // be on disk, so both stay recorded as managed.
        let mut pending = previously_managed.clone();
        pending.extend(
            result
                .managed
                .iter()
                .filter(|key| !previously_managed.contains(key))
                .cloned(),
        );
        self.store.put(keys::MANAGED_EXCLUSIONS, &pending)?;
        self.settings.write_exclusions(&result.exclusions)?;
        self.store.put(keys::MANAGED_EXCLUSIONS, &result.managed)?;

        tracing::debug!(
            managed = result.managed.len(),
            retracted = previously_managed.len(),
            total = result.exclusions.len(),
            "exclusions updated"
        );
        Ok(result)
    }
}

impl<S, X> std::fmt::Debug for StateStore<S, X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("workspace", &self.workspace)
            .field("modes", &self.modes)
            .finish_non_exhaustive()
    }
}
