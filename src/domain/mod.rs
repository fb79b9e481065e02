//! Domain layer for treefocus.
//!
//! This module contains the core domain types, independent of where state is
//! persisted or how the host renders the tree.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`marks`]: Hidden/focused marks and their decorations
//! - [`relpath`]: Helpers over project-relative, `/`-separated path strings

pub mod error;
pub mod marks;
pub mod relpath;

pub use error::{Result, TreeFocusError};
pub use marks::{Decoration, Mark};
