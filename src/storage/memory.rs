//! In-memory implementations of the persistence ports.
//!
//! Used by tests and by callers that want to compute exclusions without
//! touching disk. Both types can be told to fail writes so that error
//! propagation through the State Store can be exercised.

use crate::domain::error::{Result, TreeFocusError};
use crate::storage::backend::{ExclusionMap, ExclusionSettings, KeyValueStore};
use serde_json::Value;
use std::collections::BTreeMap;

/// In-memory key-value store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
    fail_writes: bool,
    attempts: usize,
    fail_at: Option<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates `key` with `value`.
    #[must_use]
    pub fn with_value(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    /// Makes every subsequent `set` fail with a storage error.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Makes only the `n`th `set` from now on fail (1-based).
    pub fn fail_nth_write(&mut self, n: usize) {
        self.fail_at = Some(self.attempts + n);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.attempts += 1;
        if self.fail_writes || self.fail_at == Some(self.attempts) {
            return Err(TreeFocusError::Storage(format!("write to {key} rejected")));
        }
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// In-memory exclusion mapping.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    entries: ExclusionMap,
    writes: usize,
    fail_writes: bool,
}

impl MemorySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing mapping, as if configured by the user.
    #[must_use]
    pub fn with_entries(entries: ExclusionMap) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Current mapping.
    #[must_use]
    pub const fn entries(&self) -> &ExclusionMap {
        &self.entries
    }

    /// Number of successful writes so far.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// Makes every subsequent write fail with a settings error.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl ExclusionSettings for MemorySettings {
    fn read_exclusions(&self) -> Result<ExclusionMap> {
        Ok(self.entries.clone())
    }

    fn write_exclusions(&mut self, exclusions: &ExclusionMap) -> Result<()> {
        if self.fail_writes {
            return Err(TreeFocusError::Settings("write rejected".to_string()));
        }
        self.entries.clone_from(exclusions);
        self.writes += 1;
        Ok(())
    }
}
