//! Option layering: defaults, global config, project config, environment
//! overrides and command line flags, in increasing priority.

use camino::Utf8PathBuf;
use sprig_core::error::SprigError;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

use crate::toml::SprigToml;
use crate::ConfigResult;

const CONFIG_FILE: &str = "sprig.toml";
const ENV_PREFIX: &str = "SPRIG_";
const ENV_NO_DEV: &str = "SPRIG_NO_DEV";

/// Options for one tree reconstruction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Leave top-level devDependencies out of the tree
    pub no_dev: bool,
}

impl ResolveOptions {
    /// Options with devDependencies excluded
    pub fn no_dev() -> Self {
        Self { no_dev: true }
    }
}

/// Locates sprig.toml files for a project
pub struct ConfigLoader {
    /// Project directory
    cwd: Utf8PathBuf,
    /// Directory holding `.sprig/config.toml`
    home_dir: Option<PathBuf>,
}

/// Configuration layering and merging
pub struct ConfigLayering;

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self {
            cwd,
            home_dir: dirs::home_dir(),
        }
    }

    /// Read the global config from another home directory, or skip it
    pub fn with_home_dir(mut self, home_dir: Option<PathBuf>) -> Self {
        self.home_dir = home_dir;
        self
    }

    /// Find sprig.toml in the project (walks up directory tree)
    pub fn resolve_config_path(&self) -> Option<Utf8PathBuf> {
        let mut current = Some(self.cwd.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.is_file() {
                return Some(config_path);
            }
            current = dir.parent();
        }

        None
    }

    /// Load the project sprig.toml, if any
    pub async fn load_project_config(&self) -> ConfigResult<Option<SprigToml>> {
        match self.resolve_config_path() {
            Some(path) => {
                debug!("Loading project config from {}", path);
                crate::toml::load_from_file(&path).await.map(Some)
            },
            None => Ok(None),
        }
    }

    /// Load ~/.sprig/config.toml, if any
    pub async fn load_global_config(&self) -> ConfigResult<Option<SprigToml>> {
        let Some(home_dir) = &self.home_dir else {
            return Ok(None);
        };

        let global_config_path = Utf8PathBuf::try_from(home_dir.clone())
            .map_err(|e| SprigError::ConfigValidation {
                field: "home_dir".to_string(),
                reason: format!("Invalid home directory path: {}", e),
            })?
            .join(".sprig")
            .join("config.toml");

        if global_config_path.is_file() {
            debug!("Loading global config from {}", global_config_path);
            crate::toml::load_from_file(&global_config_path).await.map(Some)
        } else {
            Ok(None)
        }
    }

    /// Load both config files and merge them with the environment and the
    /// command line flag
    pub async fn load_options(
        &self,
        env_overrides: &HashMap<String, String>,
        cli_no_dev: Option<bool>,
    ) -> ConfigResult<ResolveOptions> {
        let global_config = self.load_global_config().await?;
        let project_config = self.load_project_config().await?;

        ConfigLayering::merge(global_config, project_config, env_overrides, cli_no_dev)
    }
}

impl ConfigLayering {
    /// Merge the configuration layers into resolve options
    pub fn merge(
        global_config: Option<SprigToml>,
        project_config: Option<SprigToml>,
        env_overrides: &HashMap<String, String>,
        cli_no_dev: Option<bool>,
    ) -> ConfigResult<ResolveOptions> {
        let mut options = ResolveOptions::default();

        for layer in [global_config, project_config].into_iter().flatten() {
            if let Some(no_dev) = layer.no_dev {
                options.no_dev = no_dev;
            }
        }

        Self::apply_env_overrides(&mut options, env_overrides)?;

        // CLI flag has the highest priority
        if let Some(no_dev) = cli_no_dev {
            options.no_dev = no_dev;
        }

        Ok(options)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(
        options: &mut ResolveOptions,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                ENV_NO_DEV => {
                    options.no_dev = parse_bool(value).ok_or_else(|| {
                        SprigError::ConfigValidation {
                            field: ENV_NO_DEV.to_string(),
                            reason: format!("expected true or false, got '{}'", value),
                        }
                    })?;
                },
                _ => {
                    // Unknown environment variable, ignore
                },
            }
        }

        Ok(())
    }

    /// Collect environment variable overrides
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}
