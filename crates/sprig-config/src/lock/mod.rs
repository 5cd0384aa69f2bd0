//! package-lock.json parsing
//!
//! The resolver works on the nested `dependencies` layout of lockfile
//! versions 1 and 2. Version 3 lockfiles only carry the flat `packages`
//! map keyed by install path; those are folded back into the nested layout
//! when the file is parsed.

use camino::Utf8Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sprig_core::error::SprigError;
use tracing::debug;

use crate::ConfigResult;

const NODE_MODULES: &str = "node_modules/";

/// A parsed package-lock.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageLock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, rename = "lockfileVersion")]
    pub lockfile_version: u32,

    /// Top-level install scope
    #[serde(default)]
    pub dependencies: IndexMap<String, LockDependency>,

    /// Flat install-path layout (lockfile v2 and v3)
    #[serde(default, skip_serializing)]
    pub packages: IndexMap<String, LockPackage>,
}

/// One installed package in the nested layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LockDependency {
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,

    #[serde(default)]
    pub dev: bool,

    #[serde(default)]
    pub optional: bool,

    /// Names this package depends on, with their ranges
    #[serde(default)]
    pub requires: IndexMap<String, String>,

    /// Packages installed in this package's own node_modules
    #[serde(default)]
    pub dependencies: IndexMap<String, LockDependency>,
}

/// One entry of the flat `packages` map
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LockPackage {
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub resolved: Option<String>,

    #[serde(default)]
    pub integrity: Option<String>,

    #[serde(default)]
    pub link: bool,

    #[serde(default)]
    pub dev: bool,

    #[serde(default)]
    pub optional: bool,

    #[serde(default)]
    pub dependencies: IndexMap<String, String>,

    #[serde(default, rename = "optionalDependencies")]
    pub optional_dependencies: IndexMap<String, String>,
}

impl PackageLock {
    /// Rebuild the nested `dependencies` layout from `packages`
    ///
    /// Does nothing when the nested layout is already present. Workspace
    /// links and packages installed outside the root node_modules are left
    /// out: they are not part of the lock's install scopes.
    pub fn fold_packages(&mut self) {
        if !self.dependencies.is_empty() || self.packages.is_empty() {
            return;
        }

        let packages = std::mem::take(&mut self.packages);
        'entries: for (key, package) in &packages {
            let Some(segments) = install_path_segments(key) else {
                continue;
            };
            if package.link {
                debug!("Skipping workspace link {}", key);
                continue;
            }
            let Some((own_name, parents)) = segments.split_last() else {
                continue;
            };

            let mut scope = &mut self.dependencies;
            for parent in parents {
                match scope.get_mut(*parent) {
                    Some(dependency) => scope = &mut dependency.dependencies,
                    None => {
                        debug!("Skipping {} with no installed parent", key);
                        continue 'entries;
                    },
                }
            }

            let mut requires = package.dependencies.clone();
            for (name, range) in &package.optional_dependencies {
                requires.entry(name.clone()).or_insert_with(|| range.clone());
            }

            scope.insert(
                own_name.to_string(),
                LockDependency {
                    version: package.version.clone().unwrap_or_default(),
                    resolved: package.resolved.clone(),
                    integrity: package.integrity.clone(),
                    dev: package.dev,
                    optional: package.optional,
                    requires,
                    dependencies: IndexMap::new(),
                },
            );
        }
        self.packages = packages;
    }
}

/// Split `node_modules/a/node_modules/@s/b` into `["a", "@s/b"]`
fn install_path_segments(key: &str) -> Option<Vec<&str>> {
    let rest = key.strip_prefix(NODE_MODULES)?;
    let segments: Vec<&str> = rest.split("/node_modules/").collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return None;
    }
    Some(segments)
}

/// Parse JSON string to a PackageLock
pub fn parse_package_lock(content: &str) -> ConfigResult<PackageLock> {
    let mut lock: PackageLock =
        serde_json::from_str(content).map_err(|e| SprigError::JsonParse {
            message: format!("package-lock.json: {}", e),
        })?;
    lock.fold_packages();
    Ok(lock)
}

/// Load and parse package-lock.json from file path
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<PackageLock> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SprigError::io(format!("Failed to read {}", path), e))?;

    parse_package_lock(&content)
}
