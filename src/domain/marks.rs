//! Marks that can be placed on tree items and their visual decorations.

/// The tag a tree item currently carries.
///
/// An item carries at most one mark: marking an item hidden clears its
/// focused mark and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Excluded from the tree while hide mode is on.
    Hidden,
    /// Kept visible, with everything off its ancestor chain excluded, while
    /// focus mode is on.
    Focused,
}

impl Mark {
    /// Single-letter badge shown next to the item.
    #[must_use]
    pub const fn badge(self) -> char {
        match self {
            Self::Hidden => 'H',
            Self::Focused => 'F',
        }
    }

    /// Tooltip text accompanying the badge.
    #[must_use]
    pub const fn tooltip(self) -> &'static str {
        match self {
            Self::Hidden => "Marked for Hide",
            Self::Focused => "Marked for Focus",
        }
    }

    /// Returns the decoration for this mark.
    #[must_use]
    pub const fn decoration(self) -> Decoration {
        Decoration {
            badge: self.badge(),
            tooltip: self.tooltip(),
        }
    }
}

/// Badge and tooltip pair handed to the tree view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    pub badge: char,
    pub tooltip: &'static str,
}

impl std::fmt::Display for Decoration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.badge, self.tooltip)
    }
}
