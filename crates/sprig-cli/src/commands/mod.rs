//! Command implementations and dispatch logic.
//!
//! Each command is implemented as an async function that takes a CommandContext.
//! Rendering is kept in plain functions returning lines so it can be tested
//! without a terminal.

use camino::{Utf8Path, Utf8PathBuf};
use sprig_config::{ConfigLayering, ConfigLoader, ResolveOptions};
use sprig_core::error::{SprigError, SprigResult};
use sprig_resolver::DependencyTree;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

pub mod list;
pub mod nsolid;
pub mod tree;
pub mod why;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
    /// `SPRIG_*` variables captured at startup
    pub env_overrides: HashMap<String, String>,
    /// Home directory of the global config, if any
    pub home_dir: Option<PathBuf>,
}

impl CommandContext {
    /// Create a new command context
    pub fn new() -> SprigResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| SprigError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| SprigError::ConfigValidation {
            field: "cwd".to_string(),
            reason: format!("Current directory is not valid UTF-8: {}", e),
        })?;

        Ok(Self {
            cwd,
            output: OutputHandler::new(),
            env_overrides: ConfigLayering::collect_env_overrides(),
            home_dir: dirs::home_dir(),
        })
    }

    /// Project directory of a command, relative to the working directory
    pub fn project_dir(&self, dir: Option<Utf8PathBuf>) -> Utf8PathBuf {
        match dir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => self.cwd.join(dir),
            None => self.cwd.clone(),
        }
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> SprigResult<()> {
    match command {
        Commands::Tree { dir, no_dev, depth } => {
            info!("Printing tree (no_dev: {}, depth: {:?})", no_dev, depth);
            tree::execute(ctx.project_dir(dir), no_dev, depth, ctx).await
        },
        Commands::List { dir, no_dev, json } => {
            info!("Listing packages (no_dev: {}, json: {})", no_dev, json);
            list::execute(ctx.project_dir(dir), no_dev, json, ctx).await
        },
        Commands::Why { name, dir, no_dev } => {
            info!("Explaining {} (no_dev: {})", name, no_dev);
            why::execute(name, ctx.project_dir(dir), no_dev, ctx).await
        },
        Commands::Nsolid { file } => {
            info!("Reading N|Solid package list {}", file);
            nsolid::execute(ctx.project_dir(Some(file)), ctx).await
        },
    }
}

/// Resolve the options of a project: config files, environment, then the flag
pub async fn load_options(
    ctx: &CommandContext,
    dir: &Utf8Path,
    no_dev: bool,
) -> SprigResult<ResolveOptions> {
    let cli_no_dev = no_dev.then_some(true);
    let options = ConfigLoader::new(dir.to_owned())
        .with_home_dir(ctx.home_dir.clone())
        .load_options(&ctx.env_overrides, cli_no_dev)
        .await?;
    debug!("Resolve options for {}: {:?}", dir, options);
    Ok(options)
}

/// Load the project in `dir` and build its tree
pub async fn load_tree(
    ctx: &CommandContext,
    dir: &Utf8Path,
    no_dev: bool,
) -> SprigResult<DependencyTree> {
    let options = load_options(ctx, dir, no_dev).await?;
    sprig_resolver::get_tree(dir, options).await
}
