//! Project-relative path strings.
//!
//! Marked items are stored as root-relative, `/`-separated strings (for
//! example `src/core/a.txt`), independent of the host platform's separator.
//! The helpers here operate on that string form; converting a filesystem
//! path into it is the job of [`crate::infrastructure::Workspace`].

use std::path::{Component, Path};

/// Name used for the project root inside the keep-tree.
pub const ROOT: &str = ".";

/// Returns `true` if `candidate` is `path` itself or one of its ancestors.
///
/// Containment is decided on whole segments: `src` is an ancestor of
/// `src/core` but not of `src2/core`.
///
/// # Examples
///
/// ```
/// use treefocus::domain::relpath::is_same_or_ancestor;
///
/// assert!(is_same_or_ancestor("src", "src/core/a.txt"));
/// assert!(is_same_or_ancestor("src/core", "src/core"));
/// assert!(!is_same_or_ancestor("src", "src2/core"));
/// assert!(!is_same_or_ancestor("src/core", "src"));
/// ```
#[must_use]
pub fn is_same_or_ancestor(candidate: &str, path: &str) -> bool {
    path == candidate
        || path
            .strip_prefix(candidate)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Returns every path-prefix of `path`, shortest first, including `path`.
///
/// Empty segments (doubled or trailing slashes) are skipped.
///
/// # Examples
///
/// ```
/// use treefocus::domain::relpath::prefixes;
///
/// assert_eq!(prefixes("src/core/a.txt"), vec!["src", "src/core", "src/core/a.txt"]);
/// assert!(prefixes("").is_empty());
/// ```
#[must_use]
pub fn prefixes(path: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for part in path.split('/').filter(|p| !p.is_empty()) {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(part);
        out.push(current.clone());
    }
    out
}

/// Joins a child entry name onto a relative directory path.
///
/// The root (`"."` or `""`) joins to the bare name.
#[must_use]
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() || parent == ROOT {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Converts an already-relative filesystem path into the `/`-separated form.
///
/// `.` components are dropped. Returns `None` for an empty path or one that
/// escapes upwards (`..`) or is absolute, none of which name an item under a
/// project root.
#[must_use]
pub fn from_relative_path(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
