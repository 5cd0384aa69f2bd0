//! Logical tree reconstruction
//!
//! The resolver walks a [`DependencySource`] depth-first from its top-level
//! requirements. Every resolved identity gets exactly one node: the first
//! encounter creates and registers it, later encounters only attach it. A
//! node is registered before its requirements are explored, so cyclic
//! sources terminate.

use std::collections::HashMap;
use std::time::Instant;

use sprig_core::error::SprigResult;
use sprig_core::types::PackageId;
use tracing::{debug, info, trace};

use crate::graph::{DependencyTree, NodeId};
use crate::source::{DependencySource, Requirement};

#[cfg(test)]
mod tests;

/// Reconstruct the logical dependency tree of a source
pub fn resolve<S: DependencySource>(source: &S) -> SprigResult<DependencyTree> {
    Resolver::new(source).run()
}

/// One package whose requirements are being attached
struct Frame<'s, Scope> {
    /// `None` for the root sentinel
    scope: Option<Scope>,
    node: NodeId,
    requirements: &'s [Requirement],
    next: usize,
}

/// State of one resolution call
struct Resolver<'s, S: DependencySource> {
    source: &'s S,
    tree: DependencyTree,
    /// Identity → node map, local to this call
    seen: HashMap<PackageId, NodeId>,
}

impl<'s, S: DependencySource> Resolver<'s, S> {
    fn new(source: &'s S) -> Self {
        Self {
            source,
            tree: DependencyTree::new(),
            seen: HashMap::new(),
        }
    }

    fn run(mut self) -> SprigResult<DependencyTree> {
        let start_time = Instant::now();
        let source = self.source;

        // Explicit stack, same visiting order as recursion
        let mut stack = vec![Frame {
            scope: None,
            node: self.tree.root(),
            requirements: source.roots(),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let requirements = frame.requirements;
            let Some(requirement) = requirements.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let (parent, from) = (frame.node, frame.scope);

            let resolved = match from {
                None => source.resolve_root(requirement)?,
                Some(scope) => source.resolve(scope, requirement)?,
            };
            let Some(scope) = resolved else {
                trace!("Skipping {}", requirement);
                continue;
            };

            if let Some(node) = self.attach(parent, scope, requirement) {
                stack.push(Frame {
                    scope: Some(scope),
                    node,
                    requirements: source.requirements(scope),
                    next: 0,
                });
            }
        }

        info!(
            "Resolved {} packages ({} edges) in {}ms",
            self.tree.package_count(),
            self.tree.edge_count(),
            start_time.elapsed().as_millis()
        );
        Ok(self.tree)
    }

    /// Attach the package at `scope` under `parent`
    ///
    /// Returns the node when it was just created and still has to be
    /// explored.
    fn attach(
        &mut self,
        parent: NodeId,
        scope: S::Scope,
        requirement: &Requirement,
    ) -> Option<NodeId> {
        let source = self.source;
        let package = source.package(scope);

        if let Some(&node) = self.seen.get(package) {
            trace!("Reusing {} for {}", package, requirement);
            self.tree.add_child(parent, node);
            return None;
        }

        let range = source.range(requirement).map(str::to_string);
        let node = self.tree.add_package(package.clone(), range);
        self.seen.insert(package.clone(), node);
        self.tree.add_child(parent, node);
        debug!("Added {} for {}", package, requirement);
        Some(node)
    }
}
