//! Host command dispatch.
//!
//! Hosts invoke treefocus through string command ids (menu entries, key
//! bindings, the command line). [`Command::parse`] maps an id plus optional
//! target path onto a [`Command`], and [`handle_command`] runs it against a
//! [`StateStore`].
//!
//! # Example
//!
//! ```rust
//! use treefocus::app::{handle_command, Command, Outcome, StateStore};
//! use treefocus::infrastructure::Workspace;
//! use treefocus::storage::{MemorySettings, MemoryStore};
//! use std::path::PathBuf;
//!
//! let mut state = StateStore::new(
//!     MemoryStore::new(),
//!     MemorySettings::new(),
//!     Workspace::new([PathBuf::from("/code/app")]),
//! );
//!
//! let command = Command::parse("treefocus.enableHideMode", None)?;
//! assert_eq!(handle_command(&mut state, &command)?, Outcome::Applied);
//! assert!(state.hide_mode());
//! # Ok::<(), treefocus::TreeFocusError>(())
//! ```

use super::state::{Outcome, StateStore};
use crate::domain::error::{Result, TreeFocusError};
use crate::storage::{ExclusionSettings, KeyValueStore};
use std::path::PathBuf;

/// Commands exposed to the host.
///
/// Item commands carry an optional target; invoking one without a target
/// (for example from a palette with nothing selected) does nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleHide(Option<PathBuf>),
    ToggleFocus(Option<PathBuf>),
    Reset(Option<PathBuf>),
    EnableHideMode,
    DisableHideMode,
    EnableFocusMode,
    DisableFocusMode,
    /// Recompute exclusions without changing any mark.
    Refresh,
}

impl Command {
    /// Every command id understood by [`Command::parse`].
    pub const IDS: [&'static str; 8] = [
        "treefocus.toggleHideItem",
        "treefocus.toggleFocusItem",
        "treefocus.resetItem",
        "treefocus.enableHideMode",
        "treefocus.disableHideMode",
        "treefocus.enableFocusMode",
        "treefocus.disableFocusMode",
        "treefocus.refresh",
    ];

    /// Builds a command from its host id.
    ///
    /// `path` is only used by the item commands.
    ///
    /// # Errors
    ///
    /// Returns [`TreeFocusError::UnknownCommand`] for an unrecognised id.
    pub fn parse(id: &str, path: Option<PathBuf>) -> Result<Self> {
        let command = match id {
            "treefocus.toggleHideItem" => Self::ToggleHide(path),
            "treefocus.toggleFocusItem" => Self::ToggleFocus(path),
            "treefocus.resetItem" => Self::Reset(path),
            "treefocus.enableHideMode" => Self::EnableHideMode,
            "treefocus.disableHideMode" => Self::DisableHideMode,
            "treefocus.enableFocusMode" => Self::EnableFocusMode,
            "treefocus.disableFocusMode" => Self::DisableFocusMode,
            "treefocus.refresh" => Self::Refresh,
            other => return Err(TreeFocusError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }

    /// The host id of this command.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::ToggleHide(_) => Self::IDS[0],
            Self::ToggleFocus(_) => Self::IDS[1],
            Self::Reset(_) => Self::IDS[2],
            Self::EnableHideMode => Self::IDS[3],
            Self::DisableHideMode => Self::IDS[4],
            Self::EnableFocusMode => Self::IDS[5],
            Self::DisableFocusMode => Self::IDS[6],
            Self::Refresh => Self::IDS[7],
        }
    }
}

/// Runs `command` against `state`.
///
/// # Errors
///
/// Propagates persistence failures from the State Store unchanged; the host
/// reports them through its own error channel.
pub fn handle_command<S, X>(state: &mut StateStore<S, X>, command: &Command) -> Result<Outcome>
where
    S: KeyValueStore,
    X: ExclusionSettings,
{
    let _span = tracing::debug_span!("handle_command", command = command.id()).entered();

    let outcome = match command {
        Command::ToggleHide(Some(path)) => state.toggle_hide(path)?,
        Command::ToggleFocus(Some(path)) => state.toggle_focus(path)?,
        Command::Reset(Some(path)) => state.reset(path)?,
        Command::ToggleHide(None) | Command::ToggleFocus(None) | Command::Reset(None) => {
            tracing::debug!("no target path given");
            Outcome::Unchanged
        }
        Command::EnableHideMode => state.set_hide_mode(true)?,
        Command::DisableHideMode => state.set_hide_mode(false)?,
        Command::EnableFocusMode => state.set_focus_mode(true)?,
        Command::DisableFocusMode => state.set_focus_mode(false)?,
        Command::Refresh => state.refresh()?,
    };

    tracing::debug!(?outcome, "command handled");
    Ok(outcome)
}
