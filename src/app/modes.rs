//! Mode flags controlling how marks become exclusions.
//!
//! Each mark kind has an independent mode:
//! - **Hide mode**: hidden items are excluded from the tree
//! - **Focus mode**: everything off the ancestor chain of a focused item is
//!   excluded
//!
//! Both may be on at once, in which case focus takes priority (see
//! [`crate::app::exclusions`]).

use crate::storage::keys;

/// One of the two mode switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Hide,
    Focus,
}

impl Mode {
    /// Key under which the flag is persisted.
    #[must_use]
    pub const fn state_key(self) -> &'static str {
        match self {
            Self::Hide => keys::HIDE_MODE,
            Self::Focus => keys::FOCUS_MODE,
        }
    }

    /// Name of the UI-visibility flag mirroring this mode.
    ///
    /// Hosts use these to show "enable" or "disable" commands conditionally.
    #[must_use]
    pub const fn context_key(self) -> &'static str {
        match self {
            Self::Hide => "treefocus.hideMode",
            Self::Focus => "treefocus.focusMode",
        }
    }
}

/// Snapshot of both mode flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modes {
    pub hide: bool,
    pub focus: bool,
}

impl Modes {
    #[must_use]
    pub const fn get(self, mode: Mode) -> bool {
        match mode {
            Mode::Hide => self.hide,
            Mode::Focus => self.focus,
        }
    }

    pub fn set(&mut self, mode: Mode, value: bool) {
        match mode {
            Mode::Hide => self.hide = value,
            Mode::Focus => self.focus = value,
        }
    }

    /// Returns `true` if any mode translates marks into exclusions.
    #[must_use]
    pub const fn any(self) -> bool {
        self.hide || self.focus
    }
}
