//! Storage layer for persisted marks, modes and the exclusion mapping.
//!
//! # Modules
//!
//! - `backend`: the [`KeyValueStore`] and [`ExclusionSettings`] ports
//! - `json`: JSON file implementations with atomic writes
//! - `memory`: in-memory implementations for tests

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::{keys, ExclusionMap, ExclusionSettings, KeyValueStore, KeyValueStoreExt};
pub use json::{JsonSettingsFile, JsonStore};
pub use memory::{MemorySettings, MemoryStore};
