//! Path utilities: data directory, per-workspace state files and lexical
//! normalisation.

use std::path::{Component, Path, PathBuf};

/// Returns the data directory for treefocus storage.
///
/// Resolves to `$XDG_DATA_HOME/treefocus`, falling back to
/// `$HOME/.local/share/treefocus`, and finally to `./.treefocus` when neither
/// variable is set.
///
/// # Examples
///
/// ```no_run
/// use treefocus::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert!(data_dir.ends_with("treefocus"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn data_dir_from(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    match (xdg_data_home, home) {
        (Some(xdg), _) if xdg.is_absolute() => xdg.join("treefocus"),
        (_, Some(home)) => home.join(".local").join("share").join("treefocus"),
        _ => PathBuf::from(".treefocus"),
    }
}

/// Returns the state file that holds marks and modes for `workspace`.
///
/// Every workspace gets its own file under `<data dir>/workspaces/`, named
/// after the workspace path so that state never leaks between projects.
#[must_use]
pub fn workspace_state_file(data_dir: &Path, workspace: &Path) -> PathBuf {
    data_dir
        .join("workspaces")
        .join(format!("{}.json", workspace_slug(workspace)))
}

/// Flattens a workspace path into a single file-name-safe token.
///
/// # Examples
///
/// ```
/// use treefocus::infrastructure::paths::workspace_slug;
/// use std::path::Path;
///
/// assert_eq!(workspace_slug(Path::new("/home/me/code/app")), "home-me-code-app");
/// ```
#[must_use]
pub fn workspace_slug(workspace: &Path) -> String {
    let slug: String = workspace
        .to_string_lossy()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '_' { c } else { '-' })
        .collect();

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "root".to_string()
    } else {
        slug.to_string()
    }
}

/// Makes `path` absolute against `base` and removes `.` and `..` components.
///
/// Purely lexical: the path does not have to exist, which matters for items
/// that were marked and then deleted.
#[must_use]
pub fn normalize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_prefers_xdg() {
        let dir = data_dir_from(Some(PathBuf::from("/xdg")), Some(PathBuf::from("/home/me")));
        assert_eq!(dir, PathBuf::from("/xdg/treefocus"));
    }

    #[test]
    fn data_dir_falls_back_to_home() {
        let dir = data_dir_from(None, Some(PathBuf::from("/home/me")));
        assert_eq!(dir, PathBuf::from("/home/me/.local/share/treefocus"));

        let relative_xdg = data_dir_from(Some(PathBuf::from("rel")), Some(PathBuf::from("/home/me")));
        assert_eq!(relative_xdg, PathBuf::from("/home/me/.local/share/treefocus"));
    }

    #[test]
    fn state_files_differ_per_workspace() {
        let data = Path::new("/data");
        let a = workspace_state_file(data, Path::new("/code/a"));
        let b = workspace_state_file(data, Path::new("/code/b"));
        assert_ne!(a, b);
        assert_eq!(a, PathBuf::from("/data/workspaces/code-a.json"));
    }

    #[test]
    fn normalize_is_lexical() {
        let base = Path::new("/work/proj");
        assert_eq!(normalize(base, Path::new("src/../lib/./x")), PathBuf::from("/work/proj/lib/x"));
        assert_eq!(normalize(base, Path::new("/abs/./y")), PathBuf::from("/abs/y"));
    }
}
