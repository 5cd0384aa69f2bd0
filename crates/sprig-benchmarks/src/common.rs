//! Common utilities for benchmarks

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};
use serde_json::{json, Map, Value};

/// Project sizes every benchmark runs against
pub const PROJECT_SIZES: [usize; 3] = [100, 1_000, 10_000];

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(50)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Packages required by package `index` of a synthetic project
///
/// Packages form a binary tree with an extra chain edge, and every tenth
/// package points back up so the graph has cycles.
pub fn synthetic_requires(index: usize, size: usize) -> Vec<usize> {
    let mut targets: Vec<usize> = [index + 1, 2 * index + 1, 2 * index + 2]
        .into_iter()
        .filter(|target| *target < size)
        .collect();
    targets.dedup();
    if index % 10 == 9 {
        targets.push(index / 2);
    }
    targets
}

/// package.json requiring the first synthetic package
pub fn synthetic_manifest() -> String {
    json!({
        "name": "bench",
        "version": "1.0.0",
        "dependencies": { "p0": "^1.0.0" }
    })
    .to_string()
}

/// yarn.lock text for `size` synthetic packages
pub fn synthetic_yarn_lock(size: usize) -> String {
    let mut content = String::from("# yarn lockfile v1\n\n");
    for index in 0..size {
        content.push_str(&format!("p{}@^1.0.0:\n  version \"1.0.{}\"\n", index, index));
        let targets = synthetic_requires(index, size);
        if !targets.is_empty() {
            content.push_str("  dependencies:\n");
            for target in targets {
                content.push_str(&format!("    p{} \"^1.0.0\"\n", target));
            }
        }
        content.push('\n');
    }
    content
}

/// package-lock.json text for `size` synthetic packages, all hoisted
pub fn synthetic_package_lock(size: usize) -> String {
    let mut dependencies = Map::new();
    for index in 0..size {
        let requires: Map<String, Value> = synthetic_requires(index, size)
            .into_iter()
            .map(|target| (format!("p{}", target), json!("^1.0.0")))
            .collect();
        dependencies.insert(
            format!("p{}", index),
            json!({ "version": format!("1.0.{}", index), "requires": requires }),
        );
    }

    json!({
        "name": "bench",
        "version": "1.0.0",
        "lockfileVersion": 1,
        "dependencies": dependencies
    })
    .to_string()
}
