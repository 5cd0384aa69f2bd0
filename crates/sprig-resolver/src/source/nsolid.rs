//! Flat manifest adapter (N|Solid package list)

use sprig_config::NSolidPackage;
use sprig_core::error::{SprigError, SprigResult};
use sprig_core::types::PackageId;
use sprig_core::utils::{normalize_path, resolve_relative};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{DependencySource, Requirement};

const NODE_MODULES: &str = "node_modules/";

/// Resolves path-addressed dependencies of an installed package list
///
/// Every record names its dependencies by directory, relative to its own
/// path. The first record is the project; its dependencies are the roots.
#[derive(Debug)]
pub struct NSolidSource {
    packages: Vec<PackageId>,
    paths: Vec<PathBuf>,
    requirements: Vec<Vec<Requirement>>,
    by_path: HashMap<PathBuf, usize>,
}

impl NSolidSource {
    pub fn new(records: &[NSolidPackage]) -> Self {
        let paths: Vec<PathBuf> = records
            .iter()
            .map(|record| normalize_path(Path::new(&record.path)))
            .collect();
        let by_path = paths
            .iter()
            .enumerate()
            .rev()
            .map(|(index, path)| (path.clone(), index))
            .collect();

        Self {
            packages: records
                .iter()
                .map(|record| PackageId::new(record.name.as_str(), record.version.as_str()))
                .collect(),
            paths,
            requirements: records
                .iter()
                .map(|record| {
                    record
                        .dependencies
                        .iter()
                        .map(|relative| {
                            Requirement::new(dependency_name(relative), relative.as_str())
                        })
                        .collect()
                })
                .collect(),
            by_path,
        }
    }
}

/// Package name a relative dependency path points at
fn dependency_name(relative: &str) -> &str {
    let trimmed = relative.trim_end_matches('/');
    match trimmed.rfind(NODE_MODULES) {
        Some(at) => &trimmed[at + NODE_MODULES.len()..],
        None => trimmed.rsplit('/').next().unwrap_or(trimmed),
    }
}

impl DependencySource for NSolidSource {
    type Scope = usize;

    fn roots(&self) -> &[Requirement] {
        self.requirements.first().map(Vec::as_slice).unwrap_or(&[])
    }

    fn resolve_root(&self, requirement: &Requirement) -> SprigResult<Option<usize>> {
        self.resolve(0, requirement)
    }

    fn resolve(&self, from: usize, requirement: &Requirement) -> SprigResult<Option<usize>> {
        let target = resolve_relative(&self.paths[from], Path::new(&requirement.specifier));
        match self.by_path.get(&target) {
            Some(index) => Ok(Some(*index)),
            None => Err(SprigError::malformed(format!(
                "{} depends on {} but no package is installed at {}",
                self.packages[from],
                requirement.specifier,
                target.display()
            ))),
        }
    }

    fn requirements(&self, scope: usize) -> &[Requirement] {
        &self.requirements[scope]
    }

    fn package(&self, scope: usize) -> &PackageId {
        &self.packages[scope]
    }

    /// Path dependencies carry no version range
    fn range<'r>(&self, _requirement: &'r Requirement) -> Option<&'r str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, path: &str, dependencies: &[&str]) -> NSolidPackage {
        NSolidPackage {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            path: path.to_string(),
            dependencies: dependencies.iter().map(|dep| dep.to_string()).collect(),
        }
    }

    fn records() -> Vec<NSolidPackage> {
        vec![
            record("app", "/srv/app", &["node_modules/a", "node_modules/@s/b"]),
            record("a", "/srv/app/node_modules/a", &["../@s/b"]),
            record("b", "/srv/app/node_modules/@s/b", &[]),
        ]
    }

    #[test]
    fn test_dependency_name() {
        assert_eq!(dependency_name("node_modules/a"), "a");
        assert_eq!(dependency_name("../../node_modules/@s/b/"), "@s/b");
        assert_eq!(dependency_name("../b"), "b");
    }

    #[test]
    fn test_relative_paths_resolve() {
        let source = NSolidSource::new(&records());
        let names: Vec<&str> = source.roots().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "@s/b"]);

        let a = source.resolve_root(&source.roots()[0]).unwrap().unwrap();
        assert_eq!(a, 1);
        let b = source.resolve(a, &source.requirements(a)[0]).unwrap().unwrap();
        assert_eq!(source.package(b).name, "b");
        assert_eq!(source.range(&source.requirements(a)[0]), None);
    }

    #[test]
    fn test_unknown_path_is_malformed() {
        let mut records = records();
        records[1].dependencies = vec!["../ghost".to_string()];
        let source = NSolidSource::new(&records);

        let err = source.resolve(1, &source.requirements(1)[0]).unwrap_err();
        assert_eq!(err.code(), "MALFORMED_INPUT");
    }

    #[test]
    fn test_empty_list_has_no_roots() {
        let source = NSolidSource::new(&[]);
        assert!(source.roots().is_empty());
    }
}
