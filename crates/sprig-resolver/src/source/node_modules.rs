//! Physical tree adapter (installed `node_modules`)

use sprig_config::{InstalledPackage, PackageJson, ResolveOptions};
use sprig_core::error::{SprigError, SprigResult};
use sprig_core::types::PackageId;
use tracing::debug;

use super::scopes::{ScopeChain, ScopeTree};
use super::{declared_requirements, manifest_requirements, DependencySource, Requirement};

/// Resolves requirements the way the Node.js module loader does: a package
/// sees its own node_modules first, then every enclosing node_modules up to
/// the project's.
#[derive(Debug)]
pub struct NodeModulesSource {
    roots: Vec<Requirement>,
    scopes: ScopeTree,
}

impl NodeModulesSource {
    pub fn new(
        manifest: &PackageJson,
        installed: &InstalledPackage,
        options: ResolveOptions,
    ) -> Self {
        let mut scopes = ScopeTree::new(
            PackageId::new(installed.name.as_str(), installed.version.as_str()),
            Vec::new(),
        );

        let mut pending: Vec<(usize, &InstalledPackage)> = installed
            .children
            .iter()
            .map(|child| (ScopeTree::ROOT, child))
            .collect();
        while let Some((parent, package)) = pending.pop() {
            let scope = scopes.push(
                parent,
                &package.name,
                PackageId::new(package.name.as_str(), package.version.as_str()),
                declared_requirements([&package.dependencies]),
            );
            pending.extend(package.children.iter().map(|child| (scope, child)));
        }
        debug!("Indexed {} installed packages", scopes.len() - 1);

        Self {
            roots: manifest_requirements(manifest, options),
            scopes,
        }
    }
}

impl DependencySource for NodeModulesSource {
    type Scope = usize;

    fn roots(&self) -> &[Requirement] {
        &self.roots
    }

    fn resolve_root(&self, requirement: &Requirement) -> SprigResult<Option<usize>> {
        self.scopes
            .find_local(ScopeTree::ROOT, &requirement.name)
            .map(Some)
            .ok_or_else(|| SprigError::NotInstalled {
                name: requirement.name.clone(),
            })
    }

    fn resolve(&self, from: usize, requirement: &Requirement) -> SprigResult<Option<usize>> {
        let found = self.scopes.find_nearest(from, &requirement.name);
        if found.is_none() {
            debug!(
                "Skipping {} required by {}: not installed",
                requirement,
                self.scopes.package(from)
            );
        }
        Ok(found)
    }

    fn requirements(&self, scope: usize) -> &[Requirement] {
        self.scopes.requirements(scope)
    }

    fn package(&self, scope: usize) -> &PackageId {
        self.scopes.package(scope)
    }
}
