//! sprig.toml configuration parsing

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use sprig_core::error::SprigError;

use crate::ConfigResult;

/// Contents of a sprig.toml file
///
/// Every field is optional so a file only overrides what it names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SprigToml {
    /// Leave top-level devDependencies out of the tree
    #[serde(default, rename = "no-dev", skip_serializing_if = "Option::is_none")]
    pub no_dev: Option<bool>,
}

/// Parse TOML string to a SprigToml configuration
pub fn parse_sprig_toml(content: &str) -> ConfigResult<SprigToml> {
    toml::from_str(content).map_err(|e| SprigError::ConfigValidation {
        field: "sprig.toml".to_string(),
        reason: e.message().to_string(),
    })
}

/// Load and parse sprig.toml from file path
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<SprigToml> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SprigError::io(format!("Failed to read {}", path), e))?;

    parse_sprig_toml(&content).map_err(|e| match e {
        SprigError::ConfigValidation { reason, .. } => SprigError::ConfigValidation {
            field: path.to_string(),
            reason,
        },
        other => other,
    })
}
