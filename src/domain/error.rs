//! Error types for treefocus.
//!
//! This module defines the centralized error type [`TreeFocusError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! Note that "nothing to do" is not an error: mutations report that through
//! [`crate::app::Outcome::Unchanged`]. Errors are reserved for persistence and
//! configuration failures, which propagate to the command that triggered them.

use thiserror::Error;

/// The main error type for treefocus operations.
///
/// # Examples
///
/// ```
/// use treefocus::TreeFocusError;
///
/// fn load_settings() -> Result<(), TreeFocusError> {
///     Err(TreeFocusError::Settings("expected a JSON object".to_string()))
/// }
///
/// assert!(load_settings().is_err());
/// ```
#[derive(Debug, Error)]
pub enum TreeFocusError {
    /// Reading or writing the persisted workspace state failed.
    ///
    /// The string describes what went wrong (unparseable state file,
    /// serialization failure).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The exclusion settings document could not be read or written.
    ///
    /// Occurs when the settings file is not valid JSON, is not a JSON object,
    /// or its exclusion entry is not an object.
    #[error("Settings error: {0}")]
    Settings(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A host command id did not match any known command.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// A specialized `Result` type for treefocus operations.
pub type Result<T> = std::result::Result<T, TreeFocusError>;
