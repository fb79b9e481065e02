//! treefocus: hide and focus items in a project tree view.
//!
//! treefocus lets a user mark files and folders of a project as *hidden* or
//! *focused* and mirrors those marks into the tree view's exclusion settings
//! (the `files.exclude` object of an editor `settings.json`):
//! - **Hide mode** excludes every hidden item
//! - **Focus mode** excludes everything that is neither on the path to a
//!   focused item nor inside it
//! - Exclusions the user configured by hand are never touched
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host shim (main.rs)                                │  ← command line
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Command dispatch                                 │
//! │  - State Store (marks, modes)                       │
//! │  - Exclusion computation                            │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Infrastructure│
//! │ (ui/)         │   │ (storage/)    │   │ (infra/)      │
//! │ - Decorations │   │ - State file  │   │ - Data dir    │
//! │ - Status view │   │ - Settings    │   │ - Roots       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: State Store, exclusion computation, command dispatch
//! - [`domain`]: errors, marks, relative-path helpers
//! - [`infrastructure`]: data directory, path normalisation, project roots
//! - [`storage`]: persistence ports and their JSON / in-memory backends
//! - [`ui`]: Decoration Adapter and status rendering
//! - [`observability`]: tracing setup
//!
//! # Configuration
//!
//! Optional `.treefocus.toml` in the workspace directory:
//!
//! ```toml
//! roots = [".", "../shared"]
//! settings_file = ".vscode/settings.json"
//! exclude_key = "files.exclude"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use treefocus::app::{handle_command, Command};
//! use treefocus::{initialize, Config};
//!
//! let workspace = tempfile::tempdir()?;
//! std::fs::create_dir(workspace.path().join("build"))?;
//!
//! let config = Config {
//!     state_file: Some(workspace.path().join("state.json")),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config, workspace.path())?;
//!
//! handle_command(&mut state, &Command::ToggleHide(Some(workspace.path().join("build"))))?;
//! handle_command(&mut state, &Command::EnableHideMode)?;
//! assert_eq!(state.managed_exclusions(), vec!["build"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;

pub use app::{handle_command, Command, Outcome, StateStore};
pub use domain::{Decoration, Mark, Result, TreeFocusError};

use infrastructure::{normalize, Workspace};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use storage::{JsonSettingsFile, JsonStore};

/// Name of the optional configuration file in the workspace directory.
pub const CONFIG_FILE_NAME: &str = ".treefocus.toml";

/// A State Store backed by the on-disk state file and settings document.
pub type WorkspaceState = StateStore<JsonStore, JsonSettingsFile>;

/// Runtime configuration.
///
/// Relative paths are resolved against the workspace directory (roots) or
/// the first root (`settings_file`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Project roots shown in the tree. Empty means the workspace directory.
    pub roots: Vec<PathBuf>,

    /// Settings document holding the exclusion mapping.
    ///
    /// Default: `.vscode/settings.json`
    pub settings_file: PathBuf,

    /// Key of the exclusion object inside the settings document.
    ///
    /// Default: `files.exclude`
    pub exclude_key: String,

    /// Overrides the per-workspace state file under the data directory.
    pub state_file: Option<PathBuf>,

    /// Tracing filter, e.g. `info` or `treefocus=debug`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            settings_file: PathBuf::from(".vscode").join("settings.json"),
            exclude_key: "files.exclude".to_string(),
            state_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Loads `.treefocus.toml` from `workspace_dir`, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(workspace_dir: &Path) -> Result<Self> {
        let path = workspace_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!(path = ?path, "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&contents)
            .map_err(|e| TreeFocusError::Config(format!("{}: {e}", path.display())))
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed TOML or unknown keys.
    ///
    /// # Example
    ///
    /// ```rust
    /// use treefocus::Config;
    ///
    /// let config = Config::from_toml_str("exclude_key = \"search.exclude\"")?;
    /// assert_eq!(config.exclude_key, "search.exclude");
    /// assert_eq!(config.settings_file, std::path::Path::new(".vscode/settings.json"));
    /// # Ok::<(), treefocus::TreeFocusError>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| TreeFocusError::Config(e.to_string()))
    }

    /// Applies `key=value` overrides on top of the loaded configuration.
    ///
    /// # Parsing Rules
    ///
    /// - `roots`: comma-separated list (empty entries dropped)
    /// - `settings_file`, `state_file`: paths
    /// - `exclude_key`, `trace_level`: strings
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown key.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) -> Result<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "roots" => {
                    self.roots = value
                        .split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(PathBuf::from)
                        .collect();
                }
                "settings_file" => self.settings_file = PathBuf::from(value),
                "exclude_key" => self.exclude_key.clone_from(value),
                "state_file" => self.state_file = Some(PathBuf::from(value)),
                "trace_level" => self.trace_level = Some(value.clone()),
                other => {
                    return Err(TreeFocusError::Config(format!("unknown setting: {other}")));
                }
            }
        }
        Ok(())
    }

    /// Absolute project roots for `workspace_dir`.
    #[must_use]
    pub fn resolved_roots(&self, workspace_dir: &Path) -> Vec<PathBuf> {
        if self.roots.is_empty() {
            return vec![normalize(workspace_dir, Path::new("."))];
        }
        self.roots
            .iter()
            .map(|root| normalize(workspace_dir, root))
            .collect()
    }

    /// Absolute path of the settings document.
    #[must_use]
    pub fn settings_path(&self, workspace_dir: &Path) -> PathBuf {
        let base = self
            .resolved_roots(workspace_dir)
            .into_iter()
            .next()
            .unwrap_or_else(|| workspace_dir.to_path_buf());
        normalize(&base, &self.settings_file)
    }

    /// Absolute path of the per-workspace state file.
    #[must_use]
    pub fn state_path(&self, workspace_dir: &Path) -> PathBuf {
        self.state_file.as_ref().map_or_else(
            || {
                infrastructure::workspace_state_file(
                    &infrastructure::get_data_dir(),
                    &normalize(workspace_dir, Path::new(".")),
                )
            },
            |file| normalize(workspace_dir, file),
        )
    }
}

/// Opens the State Store for `workspace_dir`.
///
/// `workspace_dir` should be absolute; relative configuration paths are
/// resolved against it.
///
/// # Errors
///
/// Returns an error if the state file exists but cannot be loaded.
pub fn initialize(config: &Config, workspace_dir: &Path) -> Result<WorkspaceState> {
    let _span = tracing::debug_span!("initialize", workspace = %workspace_dir.display()).entered();

    let workspace = Workspace::new(config.resolved_roots(workspace_dir));
    let store = JsonStore::new(config.state_path(workspace_dir))?;
    let settings = JsonSettingsFile::new(config.settings_path(workspace_dir), config.exclude_key.clone());

    tracing::debug!(
        state_file = %store.path().display(),
        settings_file = %settings.path().display(),
        "workspace state opened"
    );

    Ok(StateStore::new(store, settings, workspace))
}
