//! `sprig why`

use camino::Utf8PathBuf;
use sprig_core::error::SprigResult;
use sprig_resolver::{flatten, DependencyTree, FlatList};

use super::{load_tree, CommandContext};

pub async fn execute(
    name: String,
    dir: Utf8PathBuf,
    no_dev: bool,
    ctx: &CommandContext,
) -> SprigResult<()> {
    let tree = load_tree(ctx, &dir, no_dev).await?;
    let flat = flatten(&tree);

    let lines = render(&tree, &flat, &name);
    if lines.is_empty() {
        ctx.output.warn(&format!("{} is not in the dependency tree", name));
        return Ok(());
    }
    for line in lines {
        ctx.output.print(&line);
    }
    Ok(())
}

/// Every path leading to each installed version of `name`
pub fn render(tree: &DependencyTree, flat: &FlatList, name: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in flat.find_all(name) {
        let label = format!("{}@{}", entry.name, entry.version);
        lines.push(label.clone());
        for mut path in entry.render_paths(tree) {
            if path.is_empty() {
                lines.push(format!("  {} (direct dependency)", label));
            } else {
                path.push(label.clone());
                lines.push(format!("  {}", path.join(" > ")));
            }
        }
    }
    lines
}
