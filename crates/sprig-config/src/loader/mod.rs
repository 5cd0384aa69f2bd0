//! Project source discovery
//!
//! A project directory is read from the first source that exists:
//! `package-lock.json`, then `yarn.lock`, then the installed `node_modules`.

use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use tracing::{debug, info};

use crate::installed::{read_installed_tree, InstalledPackage};
use crate::json::PackageJson;
use crate::lock::PackageLock;
use crate::yarn::YarnLock;
use crate::ConfigResult;

pub const PACKAGE_JSON: &str = "package.json";
pub const PACKAGE_LOCK: &str = "package-lock.json";
pub const YARN_LOCK: &str = "yarn.lock";

/// Which input a project tree is reconstructed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    PackageLock,
    YarnLock,
    NodeModules,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::PackageLock => PACKAGE_LOCK,
            SourceKind::YarnLock => YARN_LOCK,
            SourceKind::NodeModules => "node_modules",
        };
        f.write_str(name)
    }
}

/// A project's manifest together with its parsed resolution data
#[derive(Debug, Clone)]
pub enum ProjectSource {
    PackageLock {
        manifest: PackageJson,
        lock: PackageLock,
    },
    YarnLock {
        manifest: PackageJson,
        lock: YarnLock,
    },
    NodeModules {
        manifest: PackageJson,
        tree: InstalledPackage,
    },
}

impl ProjectSource {
    /// The project's package.json
    pub fn manifest(&self) -> &PackageJson {
        match self {
            ProjectSource::PackageLock { manifest, .. }
            | ProjectSource::YarnLock { manifest, .. }
            | ProjectSource::NodeModules { manifest, .. } => manifest,
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            ProjectSource::PackageLock { .. } => SourceKind::PackageLock,
            ProjectSource::YarnLock { .. } => SourceKind::YarnLock,
            ProjectSource::NodeModules { .. } => SourceKind::NodeModules,
        }
    }
}

/// Reads the resolution inputs of one project directory
pub struct ProjectLoader {
    dir: Utf8PathBuf,
}

impl ProjectLoader {
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Pick the source a project should be read from
    pub async fn detect(&self) -> SourceKind {
        if exists(&self.dir.join(PACKAGE_LOCK)).await {
            SourceKind::PackageLock
        } else if exists(&self.dir.join(YARN_LOCK)).await {
            SourceKind::YarnLock
        } else {
            SourceKind::NodeModules
        }
    }

    /// Detect the source and load it
    pub async fn load(&self) -> ConfigResult<ProjectSource> {
        let kind = self.detect().await;
        debug!("Detected {} in {}", kind, self.dir);
        self.load_as(kind).await
    }

    /// Load the project from a specific source
    pub async fn load_as(&self, kind: SourceKind) -> ConfigResult<ProjectSource> {
        let manifest = crate::json::load_from_file(&self.dir.join(PACKAGE_JSON)).await?;

        let source = match kind {
            SourceKind::PackageLock => {
                let lock = crate::lock::load_from_file(&self.dir.join(PACKAGE_LOCK)).await?;
                ProjectSource::PackageLock { manifest, lock }
            },
            SourceKind::YarnLock => {
                let lock = crate::yarn::load_from_file(&self.dir.join(YARN_LOCK)).await?;
                ProjectSource::YarnLock { manifest, lock }
            },
            SourceKind::NodeModules => {
                let tree = read_installed_tree(&self.dir).await?;
                ProjectSource::NodeModules { manifest, tree }
            },
        };

        info!("Loaded {} from {}", kind, self.dir);
        Ok(source)
    }
}

async fn exists(path: &Utf8Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
