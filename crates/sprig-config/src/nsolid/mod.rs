//! N|Solid package list parsing
//!
//! The list is a JSON array of installed packages. The first record is the
//! project itself; `dependencies` holds paths relative to the record's own
//! directory.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use sprig_core::error::SprigError;

use crate::ConfigResult;

/// One installed package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NSolidPackage {
    pub name: String,
    pub version: String,
    /// Absolute directory of the package
    pub path: String,
    /// Directories of direct dependencies, relative to `path`
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Parse a JSON package list
pub fn parse_nsolid_packages(content: &str) -> ConfigResult<Vec<NSolidPackage>> {
    serde_json::from_str(content).map_err(|e| SprigError::JsonParse {
        message: format!("N|Solid package list: {}", e),
    })
}

/// Load and parse a package list from file path
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<Vec<NSolidPackage>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SprigError::io(format!("Failed to read {}", path), e))?;

    parse_nsolid_packages(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_package_list() {
        let packages = parse_nsolid_packages(
            r#"[
                {
                    "path": "/app",
                    "name": "app",
                    "version": "1.0.0",
                    "dependencies": ["node_modules/subfs"]
                },
                {
                    "path": "/app/node_modules/subfs",
                    "name": "subfs",
                    "version": "0.2.0"
                }
            ]"#,
        )
        .unwrap();

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].dependencies, vec!["node_modules/subfs"]);
        assert!(packages[1].dependencies.is_empty());
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_nsolid_packages("[]").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(parse_nsolid_packages(r#"{"name": "app"}"#).is_err());
    }
}
