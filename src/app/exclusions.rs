//! Exclusion-set computation.
//!
//! Turns the marked items and mode flags into the exclusion mapping written
//! to the tree view's settings. The computation runs in two phases:
//!
//! 1. [`focus_exclusions`] walks the directory tree and collects every entry
//!    that is not on the way to (or inside) a focused item.
//! 2. [`managed_entries`] layers the phase 1 result and the hidden items
//!    according to the mode flags, without touching the filesystem.
//!
//! [`merge_exclusions`] then retracts the entries written by the previous
//! pass and adds the new ones, leaving entries the user configured by hand
//! untouched.
//!
//! ```text
//! focused = ["src/core"], focus mode on
//!
//! root/            keep-tree: ".", "src", "src/core"
//! ├── README.md    excluded
//! ├── docs/        excluded
//! └── src/
//!     ├── core/    kept, and everything below it
//!     └── util/    excluded
//! ```

use super::modes::Modes;
use crate::domain::relpath::{self, is_same_or_ancestor, ROOT};
use crate::storage::ExclusionMap;
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// Result of one recomputation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recomputation {
    /// The full mapping to write back, unmanaged entries included.
    pub exclusions: ExclusionMap,
    /// Keys added by this pass, to be recorded as managed.
    pub managed: Vec<String>,
}

/// Returns `true` when focus mode actually restricts the tree.
///
/// Focus mode with nothing focused behaves as if it were off.
#[must_use]
pub fn focus_active(modes: Modes, focused: &[String]) -> bool {
    modes.focus && !focused.is_empty()
}

/// Phase 1 for a single project root.
///
/// Builds the keep-tree (the root plus every path-prefix of every focused
/// item), then lists each keep-tree directory that is not itself focused
/// and returns its children that are not in the keep-tree. Paths that no
/// longer exist or cannot be read contribute nothing.
#[must_use]
pub fn focus_exclusions(root: &Path, focused: &[String]) -> Vec<String> {
    let _span = tracing::debug_span!("focus_exclusions",
        root = %root.display(),
        focused = focused.len()
    ).entered();

    let mut keep_tree: BTreeSet<String> = BTreeSet::new();
    keep_tree.insert(ROOT.to_string());
    for item in focused {
        keep_tree.extend(relpath::prefixes(item));
    }

    let focused: HashSet<&str> = focused.iter().map(String::as_str).collect();
    let mut excluded = Vec::new();

    for keep in &keep_tree {
        if focused.contains(keep.as_str()) {
            continue;
        }

        let full_path = if keep == ROOT {
            root.to_path_buf()
        } else {
            root.join(keep)
        };

        for name in list_directory(&full_path) {
            let child = relpath::join(keep, &name);
            if !keep_tree.contains(&child) {
                excluded.push(child);
            }
        }
    }

    tracing::debug!(excluded = excluded.len(), "focus walk complete");
    excluded
}

/// Phase 1 across every project root, concatenated in root order.
#[must_use]
pub fn focus_exclusions_for_roots(roots: &[PathBuf], focused: &[String]) -> Vec<String> {
    roots
        .iter()
        .flat_map(|root| focus_exclusions(root, focused))
        .collect()
}

/// Sorted entry names of `dir`, or nothing if it is not a readable directory.
fn list_directory(dir: &Path) -> Vec<String> {
    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Vec::new(),
        Err(e) => {
            tracing::trace!(path = %dir.display(), error = %e, "skipping unreadable path");
            return Vec::new();
        }
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::trace!(path = %dir.display(), error = %e, "skipping unlistable directory");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Phase 2: the keys this pass should add to the exclusion mapping.
///
/// - focus active: every phase 1 entry, plus (with hide mode also on) every
///   hidden item that is not a focused item or one of its ancestors
/// - only hide mode: every hidden item
/// - otherwise: nothing
///
/// Duplicates are dropped, keeping the first occurrence.
#[must_use]
pub fn managed_entries(
    modes: Modes,
    hidden: &[String],
    focused: &[String],
    focus_excluded: &[String],
) -> Vec<String> {
    let mut keys: Vec<&String> = Vec::new();

    if focus_active(modes, focused) {
        keys.extend(focus_excluded);
        if modes.hide {
            keys.extend(
                hidden
                    .iter()
                    .filter(|h| !focused.iter().any(|f| is_same_or_ancestor(h, f))),
            );
        }
    } else if modes.hide {
        keys.extend(hidden);
    }

    let mut seen: HashSet<&String> = HashSet::new();
    keys.into_iter()
        .filter(|k| seen.insert(*k))
        .cloned()
        .collect()
}

/// Retracts `previously_managed` from `current` and adds `managed` as `true`.
///
/// Keys that were not recorded as managed are carried over as-is.
#[must_use]
pub fn merge_exclusions(
    mut current: ExclusionMap,
    previously_managed: &[String],
    managed: &[String],
) -> ExclusionMap {
    for key in previously_managed {
        current.remove(key);
    }
    for key in managed {
        current.insert(key.clone(), Value::Bool(true));
    }
    current
}

/// Runs both phases and the merge.
#[must_use]
pub fn recompute(
    roots: &[PathBuf],
    modes: Modes,
    hidden: &[String],
    focused: &[String],
    current: ExclusionMap,
    previously_managed: &[String],
) -> Recomputation {
    let focus_excluded = if focus_active(modes, focused) {
        focus_exclusions_for_roots(roots, focused)
    } else {
        Vec::new()
    };

    let managed = managed_entries(modes, hidden, focused, &focus_excluded);
    let exclusions = merge_exclusions(current, previously_managed, &managed);

    Recomputation {
        exclusions,
        managed,
    }
}
