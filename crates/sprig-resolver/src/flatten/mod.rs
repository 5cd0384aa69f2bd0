//! Tree flattening
//!
//! Turns a resolved tree into one entry per package, each annotated with
//! every distinct ancestor path it is reachable by. A path lists the nodes
//! from the top level down to, but not including, the entry's own node.

use std::collections::HashMap;

use sprig_core::types::PackageId;

use crate::graph::{DependencyTree, NodeId};

/// One package of a flattened tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub name: String,
    pub version: String,
    /// First node of the package in the tree it was flattened from
    pub node: NodeId,
    /// Ancestor paths in discovery order
    pub paths: Vec<Vec<NodeId>>,
}

impl FlatEntry {
    /// Paths as `name@version` strings
    pub fn render_paths(&self, tree: &DependencyTree) -> Vec<Vec<String>> {
        self.paths
            .iter()
            .map(|path| {
                path.iter()
                    .filter_map(|node| tree[*node].package.as_ref())
                    .map(|package| package.to_string())
                    .collect()
            })
            .collect()
    }
}

/// Flattened tree, in first-visit order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatList {
    entries: Vec<FlatEntry>,
}

impl FlatList {
    pub fn entries(&self) -> &[FlatEntry] {
        &self.entries
    }

    /// First entry with the given name
    pub fn find(&self, name: &str) -> Option<&FlatEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Every installed version of a package
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FlatEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.name == name)
    }

    /// All paths leading to any version of a package
    pub fn paths_to(&self, name: &str) -> Vec<&[NodeId]> {
        self.entries
            .iter()
            .filter(|entry| entry.name == name)
            .flat_map(|entry| entry.paths.iter().map(Vec::as_slice))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlatEntry> {
        self.entries.iter()
    }
}

impl IntoIterator for FlatList {
    type Item = FlatEntry;
    type IntoIter = std::vec::IntoIter<FlatEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatList {
    type Item = &'a FlatEntry;
    type IntoIter = std::slice::Iter<'a, FlatEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Flatten a whole tree
pub fn flatten(tree: &DependencyTree) -> FlatList {
    flatten_from(tree, tree.root())
}

/// Flatten everything reachable below `start`
///
/// `start` itself is not listed; its children are reached by the empty path.
/// Entries are keyed by package identity, not by node, so a tree holding
/// the same `name@version` at several nodes still yields one entry. A
/// package seen again records the new path and is not explored a second
/// time, so cycles terminate.
pub fn flatten_from(tree: &DependencyTree, start: NodeId) -> FlatList {
    let mut entries: Vec<FlatEntry> = Vec::new();
    let mut index: HashMap<&PackageId, usize> = HashMap::new();

    let mut path: Vec<NodeId> = Vec::new();
    let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];

    while let Some((node, next)) = stack.last_mut() {
        let Some(&child) = tree.children(*node).get(*next) else {
            stack.pop();
            path.pop();
            continue;
        };
        *next += 1;

        let Some(package) = tree[child].package.as_ref() else {
            continue;
        };
        if let Some(&existing) = index.get(package) {
            entries[existing].paths.push(path.clone());
            continue;
        }

        index.insert(package, entries.len());
        entries.push(FlatEntry {
            name: package.name.clone(),
            version: package.version.clone(),
            node: child,
            paths: vec![path.clone()],
        });
        path.push(child);
        stack.push((child, 0));
    }

    FlatList { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sprig_core::types::PackageId;

    fn package(tree: &mut DependencyTree, name: &str) -> NodeId {
        tree.add_package(PackageId::new(name, "1.0.0"), None)
    }

    #[test]
    fn test_acyclic_paths() {
        let mut tree = DependencyTree::new();
        let a = package(&mut tree, "a");
        let b = package(&mut tree, "b");
        tree.add_child(tree.root(), a);
        tree.add_child(a, b);

        let flat = flatten(&tree);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat.find("a").unwrap().paths, vec![vec![]]);
        assert_eq!(flat.find("b").unwrap().paths, vec![vec![a]]);
    }

    #[test]
    fn test_cycle_paths() {
        let mut tree = DependencyTree::new();
        let a = package(&mut tree, "a");
        let b = package(&mut tree, "b");
        tree.add_child(tree.root(), a);
        tree.add_child(a, b);
        tree.add_child(b, a);

        let flat = flatten(&tree);
        let names: Vec<&str> = flat.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(flat.find("a").unwrap().paths, vec![vec![], vec![a, b]]);
        assert_eq!(flat.find("b").unwrap().paths, vec![vec![a]]);
        assert_eq!(
            flat.find("a").unwrap().render_paths(&tree),
            vec![vec![], vec!["a@1.0.0".to_string(), "b@1.0.0".to_string()]]
        );
    }

    #[test]
    fn test_shared_node_gets_every_path() {
        let mut tree = DependencyTree::new();
        let a = package(&mut tree, "a");
        let b = package(&mut tree, "b");
        let shared = package(&mut tree, "shared");
        let root = tree.root();
        tree.add_child(root, a);
        tree.add_child(root, b);
        tree.add_child(a, shared);
        tree.add_child(b, shared);

        let flat = flatten(&tree);
        assert_eq!(flat.paths_to("shared"), vec![&[a][..], &[b][..]]);
        assert!(flat.find("missing").is_none());
    }

    #[test]
    fn test_flatten_from_subtree() {
        let mut tree = DependencyTree::new();
        let a = package(&mut tree, "a");
        let b = package(&mut tree, "b");
        let c = package(&mut tree, "c");
        tree.add_child(tree.root(), a);
        tree.add_child(a, b);
        tree.add_child(b, c);

        let flat = flatten_from(&tree, a);
        let names: Vec<&str> = flat.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["b", "c"]);
        assert_eq!(flat.find("c").unwrap().paths, vec![vec![b]]);
    }

    #[test]
    fn test_same_identity_at_two_nodes_is_one_entry() {
        let mut tree = DependencyTree::new();
        let a = package(&mut tree, "a");
        let b = package(&mut tree, "b");
        let first = package(&mut tree, "s");
        let second = package(&mut tree, "s");
        let root = tree.root();
        tree.add_child(root, a);
        tree.add_child(root, b);
        tree.add_child(a, first);
        tree.add_child(b, second);

        let flat = flatten(&tree);
        assert_eq!(flat.find_all("s").count(), 1);
        assert_eq!(flat.len(), 3);

        let entry = flat.find("s").unwrap();
        assert_eq!(entry.node, first);
        assert_eq!(entry.paths, vec![vec![a], vec![b]]);
    }

    proptest! {
        #[test]
        fn prop_flatten_terminates(
            edges in prop::collection::vec(prop::collection::vec(0usize..6, 0..4), 6)
        ) {
            let mut tree = DependencyTree::new();
            let nodes: Vec<NodeId> =
                (0..6).map(|i| package(&mut tree, &format!("p{}", i))).collect();
            tree.add_child(tree.root(), nodes[0]);
            for (from, targets) in edges.iter().enumerate() {
                for to in targets {
                    tree.add_child(nodes[from], nodes[*to]);
                }
            }

            let flat = flatten(&tree);
            let total_paths: usize = flat.iter().map(|entry| entry.paths.len()).sum();
            prop_assert!(flat.len() <= 6);
            // one path per edge into a reached node
            prop_assert!(total_paths <= tree.edge_count());
        }
    }
}
