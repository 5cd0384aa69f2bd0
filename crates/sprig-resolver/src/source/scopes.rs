//! Nested install scopes with precomputed parent links.

use indexmap::IndexMap;
use sprig_core::types::PackageId;

use super::Requirement;

/// Walk from a scope to the enclosing ones
pub trait ScopeChain {
    type Scope: Copy;

    /// Package named `name` installed directly in `scope`
    fn find_local(&self, scope: Self::Scope, name: &str) -> Option<Self::Scope>;

    /// Scope enclosing `scope`, `None` at the root
    fn ancestor(&self, scope: Self::Scope) -> Option<Self::Scope>;

    /// Nearest scope, starting at `from` and ending at the root, that
    /// installs `name`
    fn find_nearest(&self, from: Self::Scope, name: &str) -> Option<Self::Scope> {
        let mut current = Some(from);
        while let Some(scope) = current {
            if let Some(found) = self.find_local(scope, name) {
                return Some(found);
            }
            current = self.ancestor(scope);
        }
        None
    }
}

#[derive(Debug)]
struct ScopeNode {
    package: PackageId,
    parent: Option<usize>,
    children: IndexMap<String, usize>,
    requirements: Vec<Requirement>,
}

/// Arena of install scopes
///
/// Scope 0 is the root (the project or the lockfile root). Parent links are
/// fixed when a scope is pushed, so the parsed input never needs
/// back-references.
#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<ScopeNode>,
}

impl ScopeTree {
    pub const ROOT: usize = 0;

    pub fn new(root: PackageId, requirements: Vec<Requirement>) -> Self {
        Self {
            scopes: vec![ScopeNode {
                package: root,
                parent: None,
                children: IndexMap::new(),
                requirements,
            }],
        }
    }

    /// Install `package` as `name` inside `parent`
    pub fn push(
        &mut self,
        parent: usize,
        name: &str,
        package: PackageId,
        requirements: Vec<Requirement>,
    ) -> usize {
        let index = self.scopes.len();
        self.scopes.push(ScopeNode {
            package,
            parent: Some(parent),
            children: IndexMap::new(),
            requirements,
        });
        self.scopes[parent].children.insert(name.to_string(), index);
        index
    }

    pub fn package(&self, scope: usize) -> &PackageId {
        &self.scopes[scope].package
    }

    pub fn requirements(&self, scope: usize) -> &[Requirement] {
        &self.scopes[scope].requirements
    }

    pub(crate) fn len(&self) -> usize {
        self.scopes.len()
    }
}

impl ScopeChain for ScopeTree {
    type Scope = usize;

    fn find_local(&self, scope: usize, name: &str) -> Option<usize> {
        self.scopes[scope].children.get(name).copied()
    }

    fn ancestor(&self, scope: usize) -> Option<usize> {
        self.scopes[scope].parent
    }
}
