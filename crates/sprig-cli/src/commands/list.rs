//! `sprig list`

use camino::Utf8PathBuf;
use serde::Serialize;
use sprig_core::error::{SprigError, SprigResult};
use sprig_resolver::{flatten, DependencyTree, FlatList};

use super::{load_tree, CommandContext};

/// One package as printed by `--json`
#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    name: &'a str,
    version: &'a str,
    paths: Vec<Vec<String>>,
}

pub async fn execute(
    dir: Utf8PathBuf,
    no_dev: bool,
    json: bool,
    ctx: &CommandContext,
) -> SprigResult<()> {
    let tree = load_tree(ctx, &dir, no_dev).await?;
    let flat = flatten(&tree);

    if json {
        ctx.output.print(&render_json(&tree, &flat)?);
    } else {
        for line in render_text(&tree, &flat) {
            ctx.output.print(&line);
        }
        ctx.output.info(&format!("{} packages", flat.len()));
    }
    Ok(())
}

pub fn render_json(tree: &DependencyTree, flat: &FlatList) -> SprigResult<String> {
    let entries: Vec<JsonEntry<'_>> = flat
        .iter()
        .map(|entry| JsonEntry {
            name: &entry.name,
            version: &entry.version,
            paths: entry.render_paths(tree),
        })
        .collect();

    serde_json::to_string_pretty(&entries).map_err(|e| SprigError::Serialization {
        what: "package list".to_string(),
        message: e.to_string(),
    })
}

pub fn render_text(tree: &DependencyTree, flat: &FlatList) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in flat {
        lines.push(format!("{}@{}", entry.name, entry.version));
        for path in entry.render_paths(tree) {
            if path.is_empty() {
                lines.push("  (top level)".to_string());
            } else {
                lines.push(format!("  via {}", path.join(" > ")));
            }
        }
    }
    lines
}
