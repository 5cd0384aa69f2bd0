//! Arena-backed dependency tree
//!
//! A resolved tree shares nodes: a package reachable from several parents is
//! stored once and every parent lists the same [`NodeId`]. Since identities
//! are shared rather than copied, the tree may also contain cycles. Node 0 is
//! the root sentinel; it carries no package and its children are the
//! top-level dependencies.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::ops::Index;

use sprig_core::types::PackageId;

/// Handle to a node of a [`DependencyTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its tree's arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Resolved package, `None` only for the root sentinel
    pub package: Option<PackageId>,
    /// Range the package was first required with
    pub range: Option<String>,
    /// Children in the order they were attached
    pub children: Vec<NodeId>,
}

impl TreeNode {
    pub fn version(&self) -> Option<&str> {
        self.package.as_ref().map(|id| id.version.as_str())
    }
}

/// Logical dependency tree with shared nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTree {
    nodes: Vec<TreeNode>,
}

impl DependencyTree {
    /// Create a tree holding only the root sentinel
    pub fn new() -> Self {
        Self {
            nodes: vec![TreeNode {
                package: None,
                range: None,
                children: Vec::new(),
            }],
        }
    }
}

impl Default for DependencyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for DependencyTree {
    type Output = TreeNode;

    fn index(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }
}

impl DependencyTree {
    /// The root sentinel
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Add a package node; it is not attached to any parent yet
    pub fn add_package(&mut self, package: PackageId, range: Option<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            package: Some(package),
            range,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` to the children of `parent`
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    /// Children of a node
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Top-level dependencies
    pub fn top_level(&self) -> &[NodeId] {
        self.children(self.root())
    }

    /// All package nodes in creation order
    pub fn packages(&self) -> impl Iterator<Item = (NodeId, &PackageId)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| node.package.as_ref().map(|id| (NodeId(index), id)))
    }

    /// Number of distinct packages in the tree
    pub fn package_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Number of parent → child edges, top-level edges included
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.children.len()).sum()
    }

    /// Export the package nodes as a petgraph graph
    ///
    /// Graph node `i` is tree node `i + 1`; the root sentinel is left out.
    pub fn to_graph(&self) -> DiGraph<PackageId, ()> {
        let mut graph = DiGraph::with_capacity(self.package_count(), self.edge_count());
        for (_, package) in self.packages() {
            graph.add_node(package.clone());
        }
        for (index, node) in self.nodes.iter().enumerate().skip(1) {
            for child in &node.children {
                graph.add_edge(NodeIndex::new(index - 1), NodeIndex::new(child.0 - 1), ());
            }
        }
        graph
    }

    /// Packages forming one dependency cycle, if any
    pub fn find_cycle(&self) -> Option<Vec<PackageId>> {
        let graph = self.to_graph();
        tarjan_scc(&graph)
            .into_iter()
            .find(|component| {
                component.len() > 1 || graph.contains_edge(component[0], component[0])
            })
            .map(|component| {
                let mut cycle: Vec<PackageId> =
                    component.into_iter().map(|index| graph[index].clone()).collect();
                cycle.sort();
                cycle
            })
    }

    /// Format cycle as "a@1 -> b@1 -> a@1"
    pub fn format_cycle(cycle: &[PackageId]) -> String {
        let mut names: Vec<String> = cycle.iter().map(|id| id.to_string()).collect();
        if let Some(first) = names.first().cloned() {
            names.push(first);
        }
        names.join(" -> ")
    }
}
