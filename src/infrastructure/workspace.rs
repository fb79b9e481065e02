//! Project roots and resolution of filesystem paths against them.

use crate::domain::relpath;
use std::path::{Path, PathBuf};

/// A path resolved against one of the workspace's project roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// The project root that contains the path.
    pub root: PathBuf,
    /// Root-relative, `/`-separated form, never empty.
    pub relative: String,
}

/// The set of project roots shown in the tree view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    roots: Vec<PathBuf>,
}

impl Workspace {
    /// Creates a workspace from its project roots.
    ///
    /// Duplicate roots are dropped; order is otherwise preserved.
    #[must_use]
    pub fn new(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut unique: Vec<PathBuf> = Vec::new();
        for root in roots {
            if !unique.contains(&root) {
                unique.push(root);
            }
        }
        Self { roots: unique }
    }

    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Resolves an absolute path to its project root and relative form.
    ///
    /// When roots are nested, the most specific one wins. Returns `None`
    /// when the path lies outside every root or names a root itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use treefocus::infrastructure::Workspace;
    /// use std::path::{Path, PathBuf};
    ///
    /// let ws = Workspace::new([PathBuf::from("/code/app")]);
    /// let resolved = ws.resolve(Path::new("/code/app/src/main.rs")).unwrap();
    /// assert_eq!(resolved.relative, "src/main.rs");
    /// assert!(ws.resolve(Path::new("/code/other/file")).is_none());
    /// ```
    #[must_use]
    pub fn resolve(&self, path: &Path) -> Option<ResolvedPath> {
        let root = self
            .roots
            .iter()
            .filter(|root| path.starts_with(root))
            .max_by_key(|root| root.components().count())?;

        let relative = relpath::from_relative_path(path.strip_prefix(root).ok()?)?;
        Some(ResolvedPath {
            root: root.clone(),
            relative,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_specific_root_wins() {
        let ws = Workspace::new([PathBuf::from("/code"), PathBuf::from("/code/app")]);
        let resolved = ws.resolve(Path::new("/code/app/src")).unwrap();
        assert_eq!(resolved.root, PathBuf::from("/code/app"));
        assert_eq!(resolved.relative, "src");
    }

    #[test]
    fn root_itself_does_not_resolve() {
        let ws = Workspace::new([PathBuf::from("/code/app")]);
        assert!(ws.resolve(Path::new("/code/app")).is_none());
    }

    #[test]
    fn sibling_prefix_is_not_contained() {
        let ws = Workspace::new([PathBuf::from("/code/app")]);
        assert!(ws.resolve(Path::new("/code/app2/src")).is_none());
    }

    #[test]
    fn duplicate_roots_collapse() {
        let ws = Workspace::new([PathBuf::from("/a"), PathBuf::from("/a")]);
        assert_eq!(ws.roots().len(), 1);
    }
}
