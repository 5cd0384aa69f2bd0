//! # sprig-cli
//!
//! Inspect the logical dependency tree of JavaScript projects.
//!
//! This is the main entry point for the sprig CLI tool. It handles command parsing,
//! sets up logging and error reporting, and dispatches to the command handlers.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use sprig_core::error::{SprigError, SprigResult};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Reconstruct the dependency tree Node.js sees at run time
#[derive(Parser)]
#[command(name = "sprig", version, about = "Logical dependency trees for JavaScript projects")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the logical dependency tree
    Tree {
        /// Project directory
        dir: Option<Utf8PathBuf>,
        /// Leave devDependencies out
        #[arg(long)]
        no_dev: bool,
        /// Maximum depth to print, 0 shows top-level dependencies only
        #[arg(long)]
        depth: Option<usize>,
    },
    /// List every package with the paths leading to it
    List {
        /// Project directory
        dir: Option<Utf8PathBuf>,
        /// Leave devDependencies out
        #[arg(long)]
        no_dev: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show why a package is in the tree
    Why {
        /// Package name
        name: String,
        /// Project directory
        dir: Option<Utf8PathBuf>,
        /// Leave devDependencies out
        #[arg(long)]
        no_dev: bool,
    },
    /// Print the tree of an N|Solid package list
    Nsolid {
        /// JSON package list
        file: Utf8PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting sprig v{}", env!("CARGO_PKG_VERSION"));

    if let Err(error) = run_cli(cli) {
        error!("Command failed: {}", error.code());
        eprintln!("{}", ErrorFormatter::new().format_error(&error));
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> SprigResult<()> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| SprigError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let ctx = CommandContext::new()?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "sprig={level},sprig_core={level},sprig_config={level},sprig_resolver={level}"
        ))
    });

    // Logs go to stderr so that tree and JSON output stay clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("sprig encountered an unexpected error: {}", panic_info);
        eprintln!("sprig crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/sprig-rs/sprig/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
