//! Path utilities for dependency directory lookup.
//!
//! Installed-package lists point at dependencies with paths relative to the
//! requiring package. These helpers turn them into canonical absolute paths
//! purely lexically, without touching the file system.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by resolving . and .. components
///
/// `..` never climbs above the root of an absolute path.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {
                // Skip current directory
            },
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                },
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {
                    // Already at the root
                },
                _ => {
                    // Relative path escaping its base, keep it
                    components.push(component);
                },
            },
            other => {
                components.push(other);
            },
        }
    }

    components.iter().collect()
}

/// Resolve `relative` against the directory `base` and normalize the result
pub fn resolve_relative(base: &Path, relative: &Path) -> PathBuf {
    normalize_path(&base.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("./src/../lib/./file.rs");
        let normalized = normalize_path(path);
        assert_eq!(normalized, Path::new("lib/file.rs"));
    }

    #[test]
    fn test_normalize_absolute_path() {
        assert_eq!(
            normalize_path(Path::new("/app/node_modules/a/../b")),
            Path::new("/app/node_modules/b")
        );
        assert_eq!(normalize_path(Path::new("/../etc")), Path::new("/etc"));
    }

    #[test]
    fn test_normalize_keeps_leading_parent_dirs() {
        assert_eq!(normalize_path(Path::new("../../x")), Path::new("../../x"));
    }

    #[test]
    fn test_resolve_relative() {
        let base = Path::new("/app/node_modules/a");
        assert_eq!(
            resolve_relative(base, Path::new("node_modules/b")),
            Path::new("/app/node_modules/a/node_modules/b")
        );
        assert_eq!(
            resolve_relative(base, Path::new("../c")),
            Path::new("/app/node_modules/c")
        );
        assert_eq!(
            resolve_relative(Path::new("/app"), Path::new("./node_modules/@scope/d")),
            Path::new("/app/node_modules/@scope/d")
        );
    }
}
