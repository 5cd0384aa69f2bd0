//! Input formats and configuration for sprig
//!
//! This crate reads everything the resolver consumes: package.json manifests,
//! `package-lock.json` and `yarn.lock` lockfiles, installed `node_modules`
//! trees and N|Solid package lists. It also layers the resolution options
//! from sprig.toml, environment variables and command line flags.

pub mod installed;
pub mod json;
pub mod loader;
pub mod lock;
pub mod merge;
pub mod nsolid;
pub mod toml;
pub mod yarn;

// Re-export main types
pub use installed::{read_installed_tree, InstalledPackage};
pub use json::PackageJson;
pub use loader::{ProjectLoader, ProjectSource, SourceKind};
pub use lock::{LockDependency, PackageLock};
pub use merge::{ConfigLayering, ConfigLoader, ResolveOptions};
pub use nsolid::NSolidPackage;
pub use toml::SprigToml;
pub use yarn::{YarnEntry, YarnLock};

use sprig_core::error::SprigError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, SprigError>;
