//! Nested lockfile adapter (`package-lock.json`)

use sprig_config::{LockDependency, PackageJson, PackageLock, ResolveOptions};
use sprig_core::error::{SprigError, SprigResult};
use sprig_core::types::PackageId;
use tracing::debug;

use super::scopes::{ScopeChain, ScopeTree};
use super::{declared_requirements, manifest_requirements, DependencySource, Requirement};

const LOCKFILE: &str = "package-lock.json";

/// Resolves requirements against the nested install scopes of a lockfile
///
/// Each lock entry becomes one scope whose requirements are its `requires`
/// map. A name is looked up in the entry's own nested `dependencies`, then
/// in each enclosing entry's, the lock root last.
#[derive(Debug)]
pub struct PackageLockSource {
    roots: Vec<Requirement>,
    scopes: ScopeTree,
}

impl PackageLockSource {
    pub fn new(manifest: &PackageJson, lock: &PackageLock, options: ResolveOptions) -> Self {
        let root = PackageId::new(
            lock.name.clone().or_else(|| manifest.name.clone()).unwrap_or_default(),
            lock.version.clone().or_else(|| manifest.version.clone()).unwrap_or_default(),
        );
        let mut scopes = ScopeTree::new(root, Vec::new());

        let mut pending: Vec<(usize, &str, &LockDependency)> = lock
            .dependencies
            .iter()
            .map(|(name, dependency)| (ScopeTree::ROOT, name.as_str(), dependency))
            .collect();
        while let Some((parent, name, dependency)) = pending.pop() {
            let scope = scopes.push(
                parent,
                name,
                PackageId::new(name, dependency.version.as_str()),
                declared_requirements([&dependency.requires]),
            );
            pending.extend(
                dependency
                    .dependencies
                    .iter()
                    .map(|(name, nested)| (scope, name.as_str(), nested)),
            );
        }
        debug!("Indexed {} lock scopes", scopes.len() - 1);

        Self {
            roots: manifest_requirements(manifest, options),
            scopes,
        }
    }
}

impl DependencySource for PackageLockSource {
    type Scope = usize;

    fn roots(&self) -> &[Requirement] {
        &self.roots
    }

    fn resolve_root(&self, requirement: &Requirement) -> SprigResult<Option<usize>> {
        self.scopes
            .find_local(ScopeTree::ROOT, &requirement.name)
            .map(Some)
            .ok_or_else(|| SprigError::LockOutOfSync {
                lockfile: LOCKFILE.to_string(),
                name: requirement.name.clone(),
                range: requirement.specifier.clone(),
            })
    }

    fn resolve(&self, from: usize, requirement: &Requirement) -> SprigResult<Option<usize>> {
        self.scopes
            .find_nearest(from, &requirement.name)
            .map(Some)
            .ok_or_else(|| {
                SprigError::malformed(format!(
                    "{} requires {} but no enclosing scope of {} provides it",
                    self.scopes.package(from),
                    requirement,
                    LOCKFILE
                ))
            })
    }

    fn requirements(&self, scope: usize) -> &[Requirement] {
        self.scopes.requirements(scope)
    }

    fn package(&self, scope: usize) -> &PackageId {
        self.scopes.package(scope)
    }
}
