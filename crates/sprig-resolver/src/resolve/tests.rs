use super::*;
use crate::source::{NSolidSource, NodeModulesSource, PackageLockSource, YarnLockSource};
use proptest::prelude::*;
use sprig_config::json::parse_package_json;
use sprig_config::lock::parse_package_lock;
use sprig_config::yarn::parse_yarn_lock;
use sprig_config::{InstalledPackage, NSolidPackage, ResolveOptions};

/// In-memory source: package `i` is `p{i}@1.0.0` and requires `p{j}` for
/// each `j` in `edges[i]`
struct GraphSource {
    roots: Vec<Requirement>,
    packages: Vec<PackageId>,
    requirements: Vec<Vec<Requirement>>,
}

impl GraphSource {
    fn new(roots: &[usize], edges: &[Vec<usize>]) -> Self {
        let requirement = |index: &usize| Requirement::new(format!("p{}", index), "^1.0.0");
        Self {
            roots: roots.iter().map(requirement).collect(),
            packages: (0..edges.len())
                .map(|index| PackageId::new(format!("p{}", index), "1.0.0"))
                .collect(),
            requirements: edges
                .iter()
                .map(|targets| targets.iter().map(requirement).collect())
                .collect(),
        }
    }

    fn lookup(&self, requirement: &Requirement) -> Option<usize> {
        self.packages.iter().position(|id| id.name == requirement.name)
    }
}

impl DependencySource for GraphSource {
    type Scope = usize;

    fn roots(&self) -> &[Requirement] {
        &self.roots
    }

    fn resolve_root(&self, requirement: &Requirement) -> SprigResult<Option<usize>> {
        Ok(self.lookup(requirement))
    }

    fn resolve(&self, _from: usize, requirement: &Requirement) -> SprigResult<Option<usize>> {
        Ok(self.lookup(requirement))
    }

    fn requirements(&self, scope: usize) -> &[Requirement] {
        &self.requirements[scope]
    }

    fn package(&self, scope: usize) -> &PackageId {
        &self.packages[scope]
    }
}

fn names(tree: &DependencyTree, nodes: &[NodeId]) -> Vec<String> {
    nodes
        .iter()
        .map(|node| tree[*node].package.as_ref().unwrap().to_string())
        .collect()
}

#[test]
fn test_shared_identity_is_one_node() {
    // p0 -> p2, p1 -> p2
    let source = GraphSource::new(&[0, 1], &[vec![2], vec![2], vec![]]);
    let tree = resolve(&source).unwrap();

    let top = tree.top_level();
    assert_eq!(tree.package_count(), 3);
    assert_eq!(tree.children(top[0]), tree.children(top[1]));
    assert_eq!(tree[top[0]].range.as_deref(), Some("^1.0.0"));
}

#[test]
fn test_cycle_terminates() {
    // p0 -> p1 -> p0
    let source = GraphSource::new(&[0], &[vec![1], vec![0]]);
    let tree = resolve(&source).unwrap();

    let a = tree.top_level()[0];
    let b = tree.children(a)[0];
    assert_eq!(tree.children(b), &[a]);
    assert_eq!(tree.package_count(), 2);
    assert!(tree.find_cycle().is_some());
}

#[test]
fn test_children_follow_declaration_order() {
    let source = GraphSource::new(&[0], &[vec![3, 1, 2], vec![], vec![], vec![]]);
    let tree = resolve(&source).unwrap();

    let root = tree.top_level()[0];
    assert_eq!(names(&tree, tree.children(root)), ["p3@1.0.0", "p1@1.0.0", "p2@1.0.0"]);
    // depth-first: p3 is created before p1 and p2
    let created: Vec<String> = tree.packages().map(|(_, id)| id.to_string()).collect();
    assert_eq!(created, ["p0@1.0.0", "p3@1.0.0", "p1@1.0.0", "p2@1.0.0"]);
}

#[test]
fn test_package_lock_shadowing() {
    let manifest =
        parse_package_json(r#"{"dependencies": {"a": "^1.0.0", "b": "^1.0.0"}}"#).unwrap();
    let lock = parse_package_lock(
        r#"{
            "dependencies": {
                "a": {
                    "version": "1.0.0",
                    "requires": { "b": "^2.0.0" },
                    "dependencies": { "b": { "version": "2.0.0" } }
                },
                "b": { "version": "1.0.0" }
            }
        }"#,
    )
    .unwrap();
    let source = PackageLockSource::new(&manifest, &lock, ResolveOptions::default());
    let tree = resolve(&source).unwrap();

    assert_eq!(names(&tree, tree.top_level()), ["a@1.0.0", "b@1.0.0"]);
    let a = tree.top_level()[0];
    assert_eq!(names(&tree, tree.children(a)), ["b@2.0.0"]);
    assert_eq!(tree[tree.children(a)[0]].range.as_deref(), Some("^2.0.0"));
}

#[test]
fn test_no_dev_drops_dev_only_roots() {
    let manifest = parse_package_json(
        r#"{"dependencies": {"a": "^1.0.0"}, "devDependencies": {"tap": "^12.0.0"}}"#,
    )
    .unwrap();
    let lock = parse_yarn_lock(
        "a@^1.0.0:\n  version \"1.0.0\"\n\ntap@^12.0.0:\n  version \"12.7.0\"\n",
    )
    .unwrap();

    let all = resolve(&YarnLockSource::new(&manifest, &lock, ResolveOptions::default())).unwrap();
    let no_dev = resolve(&YarnLockSource::new(&manifest, &lock, ResolveOptions::no_dev())).unwrap();
    assert_eq!(all.top_level().len(), 2);
    assert!(no_dev.top_level().len() < all.top_level().len());
}

#[test]
fn test_yarn_desync_aborts() {
    let manifest = parse_package_json(r#"{"dependencies": {"a": "^1.0.0"}}"#).unwrap();
    let lock = parse_yarn_lock(
        "a@^1.0.0:\n  version \"1.0.0\"\n  dependencies:\n    b \"^1.0.0\"\n",
    )
    .unwrap();

    let source = YarnLockSource::new(&manifest, &lock, ResolveOptions::default());
    let err = resolve(&source).unwrap_err();
    assert_eq!(err.code(), "LOCK_OUT_OF_SYNC");
    assert!(err.to_string().contains("b@^1.0.0"));
}

#[test]
fn test_yarn_link_never_desyncs() {
    let manifest = parse_package_json(
        r#"{"dependencies": {"a": "^1.0.0", "local": "link:./packages/local"}}"#,
    )
    .unwrap();
    let lock = parse_yarn_lock("a@^1.0.0:\n  version \"1.0.0\"\n").unwrap();

    let tree = resolve(&YarnLockSource::new(&manifest, &lock, ResolveOptions::default())).unwrap();
    assert_eq!(names(&tree, tree.top_level()), ["a@1.0.0"]);
}

#[test]
fn test_node_modules_gap_is_not_installed() {
    let manifest = parse_package_json(r#"{"dependencies": {"a": "^1.0.0"}}"#).unwrap();
    let installed = InstalledPackage {
        name: "app".to_string(),
        ..InstalledPackage::default()
    };

    let source = NodeModulesSource::new(&manifest, &installed, ResolveOptions::default());
    let err = resolve(&source).unwrap_err();
    assert_eq!(err.code(), "MODULE_NOT_INSTALLED");
}

#[test]
fn test_nsolid_resolution() {
    let records = vec![
        NSolidPackage {
            name: "app".to_string(),
            version: "1.0.0".to_string(),
            path: "/srv/app".to_string(),
            dependencies: vec!["node_modules/a".to_string()],
        },
        NSolidPackage {
            name: "a".to_string(),
            version: "2.0.0".to_string(),
            path: "/srv/app/node_modules/a".to_string(),
            dependencies: vec!["../../".to_string()],
        },
    ];
    let tree = resolve(&NSolidSource::new(&records)).unwrap();

    // the project record is the root, reaching it again adds a node for it
    assert_eq!(names(&tree, tree.top_level()), ["a@2.0.0"]);
    let a = tree.top_level()[0];
    assert_eq!(names(&tree, tree.children(a)), ["app@1.0.0"]);
    assert_eq!(tree[a].range, None);
}

#[test]
fn test_empty_nsolid_list() {
    let tree = resolve(&NSolidSource::new(&[])).unwrap();
    assert_eq!(tree.package_count(), 0);
}

fn graph_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<Vec<usize>>)> {
    (1usize..8).prop_flat_map(|size| {
        (
            prop::collection::vec(0..size, 0..4),
            prop::collection::vec(prop::collection::vec(0..size, 0..4), size),
        )
    })
}

proptest! {
    #[test]
    fn prop_resolution_is_deterministic((roots, edges) in graph_strategy()) {
        let source = GraphSource::new(&roots, &edges);
        let first = resolve(&source).unwrap();
        let second = resolve(&source).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.top_level().len(), roots.len());
    }

    #[test]
    fn prop_one_node_per_identity((roots, edges) in graph_strategy()) {
        let tree = resolve(&GraphSource::new(&roots, &edges)).unwrap();
        let mut identities: Vec<&PackageId> = tree.packages().map(|(_, id)| id).collect();
        let count = identities.len();
        identities.sort();
        identities.dedup();
        prop_assert_eq!(identities.len(), count);
        prop_assert!(count <= edges.len());
    }
}
