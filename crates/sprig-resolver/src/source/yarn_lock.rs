//! Flat lockfile adapter (`yarn.lock`)

use sprig_config::{PackageJson, ResolveOptions, YarnLock};
use sprig_core::error::{SprigError, SprigResult};
use sprig_core::types::PackageId;

use super::{declared_requirements, manifest_requirements, DependencySource, Requirement};

const LOCKFILE: &str = "yarn.lock";

/// Local links are installed from the workspace, never from the lockfile
const LINK_PREFIX: &str = "link:";

/// Resolves every requirement by direct `name@range` lookup
///
/// The scope of a resolved requirement is the index of its lock entry. The
/// ancestor chain plays no part: the same selector resolves the same way
/// wherever it is required from.
#[derive(Debug)]
pub struct YarnLockSource<'l> {
    lock: &'l YarnLock,
    roots: Vec<Requirement>,
    /// Identity per lock entry
    packages: Vec<PackageId>,
    /// dependencies then optionalDependencies, per lock entry
    requirements: Vec<Vec<Requirement>>,
}

impl<'l> YarnLockSource<'l> {
    pub fn new(manifest: &PackageJson, lock: &'l YarnLock, options: ResolveOptions) -> Self {
        let packages = lock
            .entries()
            .iter()
            .map(|entry| PackageId::new(entry.name().unwrap_or_default(), entry.version.as_str()))
            .collect();
        let requirements = lock
            .entries()
            .iter()
            .map(|entry| declared_requirements([&entry.dependencies, &entry.optional_dependencies]))
            .collect();

        Self {
            lock,
            roots: manifest_requirements(manifest, options),
            packages,
            requirements,
        }
    }

    fn lookup(&self, requirement: &Requirement) -> SprigResult<Option<usize>> {
        if requirement.specifier.starts_with(LINK_PREFIX) {
            return Ok(None);
        }
        match self.lock.get(&requirement.selector()) {
            Some((index, _)) => Ok(Some(index)),
            None => Err(SprigError::LockOutOfSync {
                lockfile: LOCKFILE.to_string(),
                name: requirement.name.clone(),
                range: requirement.specifier.clone(),
            }),
        }
    }
}

impl DependencySource for YarnLockSource<'_> {
    type Scope = usize;

    fn roots(&self) -> &[Requirement] {
        &self.roots
    }

    fn resolve_root(&self, requirement: &Requirement) -> SprigResult<Option<usize>> {
        self.lookup(requirement)
    }

    fn resolve(&self, _from: usize, requirement: &Requirement) -> SprigResult<Option<usize>> {
        self.lookup(requirement)
    }

    fn requirements(&self, scope: usize) -> &[Requirement] {
        &self.requirements[scope]
    }

    fn package(&self, scope: usize) -> &PackageId {
        &self.packages[scope]
    }
}
