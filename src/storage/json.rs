//! JSON file-based storage backends.
//!
//! Two backends live here:
//!
//! - [`JsonStore`]: the per-workspace key-value state file.
//! - [`JsonSettingsFile`]: the exclusion object inside an editor settings
//!   document (`.vscode/settings.json` style).
//!
//! Both use atomic file writes (write-to-temp + rename) so a crash never
//! leaves a half-written document behind.

use crate::domain::error::{Result, TreeFocusError};
use crate::storage::backend::{ExclusionMap, ExclusionSettings, KeyValueStore};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current version of the state file format.
const STATE_VERSION: u32 = 1;

/// State file container format.
///
/// ```json
/// {
///   "version": 1,
///   "updated_at": 1767225600,
///   "values": {
///     "hideMode": true,
///     "hiddenItems": ["build", "dist"]
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Unix timestamp of the last write.
    #[serde(default)]
    updated_at: Option<i64>,

    #[serde(default)]
    values: BTreeMap<String, Value>,
}

impl Default for StateData {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            updated_at: None,
            values: BTreeMap::new(),
        }
    }
}

/// JSON file key-value store.
///
/// The whole document is kept in memory and written back on every `set`.
/// A value only becomes visible to `get` once it has been written, so a
/// failed `set` leaves both the file and the in-memory view unchanged.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`; it has exactly one writer, the State
/// Store that owns it.
#[derive(Debug)]
pub struct JsonStore {
    file_path: PathBuf,
    data: StateData,
}

impl JsonStore {
    /// Creates or opens a JSON state file.
    ///
    /// If the file exists, loads existing data. Otherwise starts empty; the
    /// file and its parent directories are created on first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or contains
    /// invalid JSON.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use treefocus::storage::JsonStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonStore::new(PathBuf::from("/tmp/treefocus-state.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON state store");

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no state file yet, starting empty");
            StateData::default()
        };

        Ok(Self { file_path, data })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StateData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StateData = serde_json::from_str(&contents)
            .map_err(|e| TreeFocusError::Storage(format!("failed to parse {}: {e}", path.display())))?;

        if data.version > STATE_VERSION {
            tracing::warn!(version = data.version, "state file written by a newer version");
        }

        tracing::debug!(
            version = data.version,
            keys = data.values.len(),
            "loaded state data"
        );

        Ok(data)
    }

    fn save_to_file(&self, data: &StateData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| TreeFocusError::Storage(format!("failed to serialize state: {e}")))?;

        write_atomic(&self.file_path, &json)?;
        tracing::debug!(path = ?self.file_path, "state saved");
        Ok(())
    }
}

impl KeyValueStore for JsonStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.data.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key).entered();

        if self.data.values.get(key) == Some(&value) {
            tracing::trace!("skipping save, value unchanged");
            return Ok(());
        }

        let mut next = self.data.clone();
        next.values.insert(key.to_string(), value);
        next.updated_at = Some(chrono::Utc::now().timestamp());

        self.save_to_file(&next)?;
        self.data = next;
        Ok(())
    }
}

/// The exclusion object inside a JSON settings document.
///
/// Only the entry named by `key` (for example `files.exclude`) is ever
/// rewritten; every other top-level setting is read back and written out
/// unchanged. The document is re-read before each write so edits made by
/// other tools in the meantime are kept.
#[derive(Debug, Clone)]
pub struct JsonSettingsFile {
    file_path: PathBuf,
    key: String,
}

impl JsonSettingsFile {
    #[must_use]
    pub fn new(file_path: PathBuf, key: impl Into<String>) -> Self {
        Self {
            file_path,
            key: key.into(),
        }
    }

    /// Path of the settings document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_document(&self) -> Result<Map<String, Value>> {
        if !self.file_path.exists() {
            return Ok(Map::new());
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(TreeFocusError::Settings(format!(
                "{} is not a JSON object",
                self.file_path.display()
            ))),
            Err(e) => Err(TreeFocusError::Settings(format!(
                "failed to parse {}: {e}",
                self.file_path.display()
            ))),
        }
    }
}

impl ExclusionSettings for JsonSettingsFile {
    fn read_exclusions(&self) -> Result<ExclusionMap> {
        let document = self.load_document()?;
        match document.get(&self.key) {
            None | Some(Value::Null) => Ok(ExclusionMap::new()),
            Some(Value::Object(entries)) => Ok(entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()),
            Some(_) => Err(TreeFocusError::Settings(format!(
                "\"{}\" in {} is not an object",
                self.key,
                self.file_path.display()
            ))),
        }
    }

    fn write_exclusions(&mut self, exclusions: &ExclusionMap) -> Result<()> {
        let _span = tracing::debug_span!("settings_write_exclusions",
            path = ?self.file_path,
            count = exclusions.len()
        ).entered();

        let mut document = self.load_document()?;
        let entries: Map<String, Value> = exclusions
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        document.insert(self.key.clone(), Value::Object(entries));

        let json = serde_json::to_string_pretty(&Value::Object(document))
            .map_err(|e| TreeFocusError::Settings(format!("failed to serialize settings: {e}")))?;
        write_atomic(&self.file_path, &json)?;

        tracing::debug!("exclusions written");
        Ok(())
    }
}

/// Writes `contents` to a sibling temp file, then renames it over `path`.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("tmp");
    tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
    std::fs::write(&tmp_path, contents)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}
