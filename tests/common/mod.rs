#![allow(dead_code)]

use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use treefocus::infrastructure::Workspace;
use treefocus::storage::{ExclusionMap, MemorySettings, MemoryStore};
use treefocus::StateStore;

pub type TestState = StateStore<MemoryStore, MemorySettings>;

/// Creates a directory tree from `/`-separated entries; a trailing `/`
/// makes a directory, anything else an empty file.
pub fn tree(entries: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for entry in entries {
        let path = dir.path().join(entry.trim_end_matches('/'));
        if entry.ends_with('/') {
            std::fs::create_dir_all(&path).unwrap();
        } else {
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, "").unwrap();
        }
    }
    dir
}

pub fn state_for(root: &Path) -> TestState {
    state_with(root, MemorySettings::new())
}

pub fn state_with(root: &Path, settings: MemorySettings) -> TestState {
    StateStore::new(
        MemoryStore::new(),
        settings,
        Workspace::new([root.to_path_buf()]),
    )
}

pub fn at(root: &Path, relative: &str) -> PathBuf {
    root.join(relative)
}

/// Keys currently set to `true` in the exclusion mapping, sorted.
pub fn excluded(state: &TestState) -> Vec<String> {
    state
        .settings()
        .entries()
        .iter()
        .filter(|(_, v)| **v == Value::Bool(true))
        .map(|(k, _)| k.clone())
        .collect()
}

pub fn sorted(mut items: Vec<String>) -> Vec<String> {
    items.sort();
    items
}

pub fn user_entries(pairs: &[(&str, Value)]) -> ExclusionMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}
