//! Logical dependency tree reconstruction for sprig
//!
//! This crate rebuilds the tree the Node.js module loader would see from
//! already-resolved package metadata. Each input format is normalized by a
//! source adapter, the resolver turns any adapter into a [`DependencyTree`],
//! and the flattener lists every package with the paths leading to it.

pub mod flatten;
pub mod graph;
pub mod resolve;
pub mod source;

// Re-export main types
pub use flatten::{flatten, flatten_from, FlatEntry, FlatList};
pub use graph::{DependencyTree, NodeId, TreeNode};
pub use resolve::resolve;
pub use source::{
    DependencySource, NSolidSource, NodeModulesSource, PackageLockSource, Requirement,
    YarnLockSource,
};

use camino::Utf8Path;
use sprig_config::{
    InstalledPackage, NSolidPackage, PackageJson, PackageLock, ProjectLoader, ProjectSource,
    ResolveOptions, SourceKind, YarnLock,
};
use sprig_core::error::SprigError;
use tracing::debug;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, SprigError>;

/// Tree of a project described by package.json and package-lock.json
pub fn from_package_lock(
    manifest: &PackageJson,
    lock: &PackageLock,
    options: ResolveOptions,
) -> ResolverResult<DependencyTree> {
    resolve(&PackageLockSource::new(manifest, lock, options))
}

/// Tree of a project described by package.json and yarn.lock
pub fn from_yarn_lock(
    manifest: &PackageJson,
    lock: &YarnLock,
    options: ResolveOptions,
) -> ResolverResult<DependencyTree> {
    resolve(&YarnLockSource::new(manifest, lock, options))
}

/// Tree of a project from its installed node_modules
pub fn from_installed(
    manifest: &PackageJson,
    installed: &InstalledPackage,
    options: ResolveOptions,
) -> ResolverResult<DependencyTree> {
    resolve(&NodeModulesSource::new(manifest, installed, options))
}

/// Tree of an N|Solid package list; the first record is the project
pub fn from_nsolid(packages: &[NSolidPackage]) -> ResolverResult<DependencyTree> {
    resolve(&NSolidSource::new(packages))
}

/// Tree of an already loaded project
pub fn from_project(
    project: &ProjectSource,
    options: ResolveOptions,
) -> ResolverResult<DependencyTree> {
    debug!("Building tree from {} ({:?})", project.kind(), options);
    match project {
        ProjectSource::PackageLock { manifest, lock } => {
            from_package_lock(manifest, lock, options)
        },
        ProjectSource::YarnLock { manifest, lock } => from_yarn_lock(manifest, lock, options),
        ProjectSource::NodeModules { manifest, tree } => from_installed(manifest, tree, options),
    }
}

/// Load the project in `dir` from its best source and build its tree
///
/// package-lock.json is preferred, then yarn.lock, then node_modules.
pub async fn get_tree(dir: &Utf8Path, options: ResolveOptions) -> ResolverResult<DependencyTree> {
    let project = ProjectLoader::new(dir.to_owned()).load().await?;
    from_project(&project, options)
}

/// Build the tree of the project in `dir` from node_modules, ignoring lockfiles
pub async fn from_node_modules(
    dir: &Utf8Path,
    options: ResolveOptions,
) -> ResolverResult<DependencyTree> {
    let project = ProjectLoader::new(dir.to_owned())
        .load_as(SourceKind::NodeModules)
        .await?;
    from_project(&project, options)
}
