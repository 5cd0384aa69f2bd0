//! Source adapters
//!
//! Every input format is normalized behind [`DependencySource`]: a set of
//! top-level requirements, and for each source scope its declared
//! requirements, its package identity and a lookup for required names. The
//! resolver only ever talks to this trait.

pub mod node_modules;
pub mod nsolid;
pub mod package_lock;
mod scopes;
pub mod yarn_lock;

pub use node_modules::NodeModulesSource;
pub use nsolid::NSolidSource;
pub use package_lock::PackageLockSource;
pub use scopes::{ScopeChain, ScopeTree};
pub use yarn_lock::YarnLockSource;

use indexmap::IndexMap;
use sprig_config::{PackageJson, ResolveOptions};
use sprig_core::error::SprigResult;
use sprig_core::types::{DependencyKind, PackageId};
use std::fmt;

/// A dependency as written by the package that requires it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requirement {
    pub name: String,
    /// Version range, or a relative directory for path-addressed sources
    pub specifier: String,
}

impl Requirement {
    pub fn new(name: impl Into<String>, specifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specifier: specifier.into(),
        }
    }

    /// The `name@range` selector flat lockfiles are keyed by
    pub fn selector(&self) -> String {
        format!("{}@{}", self.name, self.specifier)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.specifier)
    }
}

/// Normalized view of one resolution input
pub trait DependencySource {
    /// Handle to a node of the source representation
    type Scope: Copy + Eq + fmt::Debug;

    /// Requirements resolution starts from, in order
    fn roots(&self) -> &[Requirement];

    /// Resolve a top-level requirement
    ///
    /// `Ok(None)` skips the requirement silently.
    fn resolve_root(&self, requirement: &Requirement) -> SprigResult<Option<Self::Scope>>;

    /// Resolve a requirement declared by the package at `from`
    fn resolve(
        &self,
        from: Self::Scope,
        requirement: &Requirement,
    ) -> SprigResult<Option<Self::Scope>>;

    /// Requirements declared by the package at `scope`, in order
    fn requirements(&self, scope: Self::Scope) -> &[Requirement];

    /// Identity of the package at `scope`
    fn package(&self, scope: Self::Scope) -> &PackageId;

    /// Range recorded on the tree node created for `requirement`
    fn range<'r>(&self, requirement: &'r Requirement) -> Option<&'r str> {
        Some(requirement.specifier.as_str())
    }
}

/// Top-level requirements of a manifest
///
/// dependencies, then devDependencies (unless `no_dev`), then
/// optionalDependencies, each in declaration order. A name already taken by
/// an earlier section keeps its first range.
pub fn manifest_requirements(manifest: &PackageJson, options: ResolveOptions) -> Vec<Requirement> {
    let sections = DependencyKind::MERGE_ORDER
        .iter()
        .filter(|kind| !(options.no_dev && kind.is_dev_only()))
        .map(|kind| manifest.section(*kind));

    declared_requirements(sections)
}

/// Declared requirements of a package: one entry per name, first wins
pub(crate) fn declared_requirements<'a>(
    sections: impl IntoIterator<Item = &'a IndexMap<String, String>>,
) -> Vec<Requirement> {
    let mut merged: IndexMap<&str, &str> = IndexMap::new();
    for section in sections {
        for (name, range) in section {
            merged.entry(name.as_str()).or_insert(range.as_str());
        }
    }
    merged
        .into_iter()
        .map(|(name, range)| Requirement::new(name, range))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_config::json::parse_package_json;

    fn manifest() -> PackageJson {
        parse_package_json(
            r#"{
                "dependencies": { "b": "^1.0.0", "a": "^2.0.0" },
                "devDependencies": { "tap": "^12.0.0", "a": "^9.0.0" },
                "optionalDependencies": { "fsevents": "^2.0.0", "b": "^3.0.0" }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_manifest_merge_order() {
        let requirements = manifest_requirements(&manifest(), ResolveOptions::default());
        assert_eq!(
            requirements,
            vec![
                Requirement::new("b", "^1.0.0"),
                Requirement::new("a", "^2.0.0"),
                Requirement::new("tap", "^12.0.0"),
                Requirement::new("fsevents", "^2.0.0"),
            ]
        );
    }

    #[test]
    fn test_manifest_no_dev() {
        let all = manifest_requirements(&manifest(), ResolveOptions::default());
        let no_dev = manifest_requirements(&manifest(), ResolveOptions::no_dev());
        assert_eq!(no_dev.len(), 3);
        assert!(no_dev.len() < all.len());
        assert!(no_dev.iter().all(|r| r.name != "tap"));
    }

    #[test]
    fn test_requirement_selector() {
        let requirement = Requirement::new("@babel/core", "^7.0.0");
        assert_eq!(requirement.selector(), "@babel/core@^7.0.0");
        assert_eq!(requirement.to_string(), "@babel/core@^7.0.0");
    }
}
