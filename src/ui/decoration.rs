//! Decoration Adapter: badges for marked items.
//!
//! [`DecorationProvider`] answers "what badge does this path get?" by asking
//! the State Store, and turns the store's change notifications into refresh
//! requests for the tree view.
//!
//! # Example
//!
//! ```rust
//! use treefocus::app::StateStore;
//! use treefocus::infrastructure::Workspace;
//! use treefocus::storage::{MemorySettings, MemoryStore};
//! use treefocus::ui::{DecorationProvider, RefreshScope};
//! use std::path::PathBuf;
//!
//! let root = PathBuf::from("/code/app");
//! let mut state = StateStore::new(
//!     MemoryStore::new(),
//!     MemorySettings::new(),
//!     Workspace::new([root.clone()]),
//! );
//! let provider = DecorationProvider::new(&mut state);
//!
//! state.toggle_focus(&root.join("src"))?;
//!
//! let badge = provider.decorate(&state, &root.join("src")).unwrap();
//! assert_eq!(badge.badge, 'F');
//! assert_eq!(provider.pending_refreshes(), vec![RefreshScope::Path(root.join("src"))]);
//! # Ok::<(), treefocus::TreeFocusError>(())
//! ```

use crate::app::{Notification, StateStore};
use crate::domain::Decoration;
use crate::storage::{ExclusionSettings, KeyValueStore};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

/// Which decorations the tree view should re-query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshScope {
    All,
    Path(PathBuf),
}

/// Maps paths to badges and relays change notifications.
#[derive(Debug)]
pub struct DecorationProvider {
    changes: Receiver<Notification>,
}

impl DecorationProvider {
    /// Creates a provider subscribed to `state`'s change notifications.
    pub fn new<S: KeyValueStore, X: ExclusionSettings>(state: &mut StateStore<S, X>) -> Self {
        Self {
            changes: state.subscribe(),
        }
    }

    /// Returns the decoration for an absolute path.
    ///
    /// `None` when the item carries no mark or lies outside every project
    /// root. The hidden mark is checked first; an item never carries both.
    #[must_use]
    pub fn decorate<S: KeyValueStore, X: ExclusionSettings>(
        &self,
        state: &StateStore<S, X>,
        path: &Path,
    ) -> Option<Decoration> {
        let resolved = state.workspace().resolve(path)?;
        state.mark_of(&resolved.relative).map(|mark| mark.decoration())
    }

    /// Drains pending notifications into refresh requests.
    ///
    /// An unscoped change supersedes every scoped one, in which case a single
    /// [`RefreshScope::All`] is returned. Repeated paths are reported once.
    #[must_use]
    pub fn pending_refreshes(&self) -> Vec<RefreshScope> {
        let mut scopes: Vec<RefreshScope> = Vec::new();

        for notification in self.changes.try_iter() {
            let Notification::DecorationsChanged(scope) = notification else {
                continue;
            };
            let scope = scope.map_or(RefreshScope::All, RefreshScope::Path);
            if scope == RefreshScope::All {
                scopes = vec![RefreshScope::All];
            } else if !scopes.contains(&RefreshScope::All) && !scopes.contains(&scope) {
                scopes.push(scope);
            }
        }

        scopes
    }
}
