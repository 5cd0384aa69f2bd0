//! Installed package tree reader
//!
//! Reads the physical `node_modules` layout of a project into a nested
//! [`InstalledPackage`] tree. A package's children are the packages
//! installed in its own `node_modules` directory, including scoped
//! packages under `node_modules/@scope/<name>`.

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use sprig_core::error::SprigError;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::json::parse_package_json;
use crate::ConfigResult;

/// One installed package directory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstalledPackage {
    /// Name the package is installed under (its path below node_modules)
    pub name: String,
    pub version: String,
    pub path: Utf8PathBuf,
    /// Regular dependencies from the package's own package.json
    pub dependencies: IndexMap<String, String>,
    /// Packages installed in this package's node_modules
    pub children: Vec<InstalledPackage>,
}

impl InstalledPackage {
    /// Total number of installed packages below this one
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// Read the installed tree of the project in `dir`
///
/// The returned root is the project itself; its children are the top-level
/// installed packages.
pub async fn read_installed_tree(dir: &Utf8Path) -> ConfigResult<InstalledPackage> {
    let dir = dir.to_owned();
    tokio::task::spawn_blocking(move || read_root(&dir))
        .await
        .map_err(|e| {
            SprigError::io(
                "node_modules reader task failed".to_string(),
                std::io::Error::new(std::io::ErrorKind::Other, e),
            )
        })?
}

fn read_root(dir: &Utf8Path) -> ConfigResult<InstalledPackage> {
    let root = read_package(dir.to_owned(), None, false)?;
    debug!(
        "Read {} installed packages below {}",
        root.descendant_count(),
        dir
    );
    Ok(root)
}

/// Read one package directory; `name` is `None` for the project root
fn read_package(
    path: Utf8PathBuf,
    name: Option<String>,
    linked: bool,
) -> ConfigResult<InstalledPackage> {
    let manifest_path = path.join("package.json");
    let content = std::fs::read_to_string(&manifest_path)
        .map_err(|e| SprigError::io(format!("Failed to read {}", manifest_path), e))?;
    let manifest = parse_package_json(&content).map_err(|e| match e {
        SprigError::JsonParse { message } => SprigError::JsonParse {
            message: format!("In file {}: {}", manifest_path, message),
        },
        other => other,
    })?;

    // Symlinked packages can point back into the project; their own
    // node_modules is not part of this install.
    let children = if linked {
        Vec::new()
    } else {
        read_children(&path)?
    };

    let name = name
        .or(manifest.name)
        .or_else(|| path.file_name().map(str::to_string))
        .unwrap_or_else(|| "root".to_string());

    Ok(InstalledPackage {
        name,
        version: manifest.version.unwrap_or_default(),
        path,
        dependencies: manifest.dependencies,
        children,
    })
}

fn read_children(dir: &Utf8Path) -> ConfigResult<Vec<InstalledPackage>> {
    let node_modules = dir.join("node_modules");
    if !node_modules.is_dir() {
        return Ok(Vec::new());
    }

    let mut children = Vec::new();
    let walker = WalkDir::new(&node_modules)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            let in_scope = entry.depth() < 2
                || entry
                    .path()
                    .parent()
                    .and_then(|parent| parent.file_name())
                    .map(|scope| scope.to_string_lossy().starts_with('@'))
                    .unwrap_or(false);
            !hidden && in_scope
        });

    for entry in walker {
        let entry = entry.map_err(|e| {
            SprigError::io(format!("Failed to read {}", node_modules), e.into())
        })?;

        let Ok(path) = Utf8PathBuf::from_path_buf(entry.path().to_path_buf()) else {
            warn!("Skipping non UTF-8 path {}", entry.path().display());
            continue;
        };
        let Ok(relative) = path.strip_prefix(&node_modules) else {
            continue;
        };
        let name = relative
            .components()
            .map(|component| component.as_str())
            .collect::<Vec<_>>()
            .join("/");

        if entry.depth() == 1 && name.starts_with('@') {
            // Scope directory, packages live one level down
            continue;
        }
        if !path.join("package.json").is_file() {
            continue;
        }

        children.push(read_package(path, Some(name), entry.path_is_symlink())?);
    }

    Ok(children)
}
