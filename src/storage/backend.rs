//! Persistence port abstractions.
//!
//! This module defines the two external stores the State Store talks to:
//!
//! - [`KeyValueStore`]: workspace-scoped key-value settings where the marks
//!   and mode flags live.
//! - [`ExclusionSettings`]: the exclusion mapping consumed by the tree view's
//!   filtering engine.
//!
//! Both are deliberately small: each method maps directly onto one thing the
//! State Store needs, so that an in-memory fake can stand in for the real
//! backend in tests.

use crate::domain::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Keys owned by treefocus inside the workspace key-value store.
pub mod keys {
    /// Whether hidden items are currently translated into exclusions.
    pub const HIDE_MODE: &str = "hideMode";
    /// Whether focused items currently restrict the tree.
    pub const FOCUS_MODE: &str = "focusMode";
    /// Ordered list of hidden relative paths.
    pub const HIDDEN_ITEMS: &str = "hiddenItems";
    /// Ordered list of focused relative paths.
    pub const FOCUSED_ITEMS: &str = "focusedItems";
    /// Exclusion keys written by the last recomputation.
    pub const MANAGED_EXCLUSIONS: &str = "managedExclusions";
}

/// Relative-path pattern → exclusion rule.
///
/// Rules written by treefocus are always `true`. Entries configured by the
/// user may hold any JSON value and are carried through untouched.
pub type ExclusionMap = BTreeMap<String, Value>;

/// Workspace-scoped key-value persistence.
///
/// # Implementations
///
/// - [`crate::storage::JsonStore`]: JSON file with atomic writes
/// - [`crate::storage::MemoryStore`]: in-memory, for tests and dry runs
pub trait KeyValueStore: Send {
    /// Returns the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// Typed access on top of [`KeyValueStore`].
///
/// Reads never fail: an absent key, or one holding a value of the wrong
/// shape, yields the supplied default.
pub trait KeyValueStoreExt: KeyValueStore {
    /// Reads `key` as `T`, falling back to `default`.
    fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            None => default,
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!(key = %key, error = %e, "stored value has unexpected shape, using default");
                default
            }),
        }
    }

    /// Serializes `value` and stores it under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|e| {
            crate::TreeFocusError::Storage(format!("failed to serialize {key}: {e}"))
        })?;
        self.set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

/// The exclusion configuration of the tree view.
///
/// # Implementations
///
/// - [`crate::storage::JsonSettingsFile`]: one object inside a JSON settings document
/// - [`crate::storage::MemorySettings`]: in-memory, for tests
pub trait ExclusionSettings: Send {
    /// Reads the current exclusion mapping. A missing mapping reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing document exists but cannot be parsed.
    fn read_exclusions(&self) -> Result<ExclusionMap>;

    /// Replaces the exclusion mapping with `exclusions`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping cannot be persisted.
    fn write_exclusions(&mut self, exclusions: &ExclusionMap) -> Result<()>;
}
