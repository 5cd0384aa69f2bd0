//! package.json manifest parsing

use camino::Utf8Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sprig_core::error::SprigError;
use sprig_core::types::DependencyKind;

use crate::ConfigResult;

/// The parts of package.json that take part in dependency resolution
///
/// Dependency maps keep declaration order, which decides the order of
/// top-level children in the reconstructed tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageJson {
    /// Package name (absent for many private applications)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Package version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Runtime dependencies
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,

    /// Development dependencies
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: IndexMap<String, String>,

    /// Optional dependencies
    #[serde(default, rename = "optionalDependencies")]
    pub optional_dependencies: IndexMap<String, String>,
}

impl PackageJson {
    /// Dependencies declared in one section
    pub fn section(&self, kind: DependencyKind) -> &IndexMap<String, String> {
        match kind {
            DependencyKind::Normal => &self.dependencies,
            DependencyKind::Dev => &self.dev_dependencies,
            DependencyKind::Optional => &self.optional_dependencies,
        }
    }
}

/// Parse JSON string to a PackageJson manifest
pub fn parse_package_json(content: &str) -> ConfigResult<PackageJson> {
    serde_json::from_str(content).map_err(|e| SprigError::JsonParse {
        message: format!("package.json: {}", e),
    })
}

/// Load and parse package.json from file path
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<PackageJson> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SprigError::io(format!("Failed to read {}", path), e))?;

    parse_package_json(&content).map_err(|e| match e {
        SprigError::JsonParse { message } => SprigError::JsonParse {
            message: format!("In file {}: {}", path, message),
        },
        other => other,
    })
}
