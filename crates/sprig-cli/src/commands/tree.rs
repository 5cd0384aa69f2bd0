//! `sprig tree`

use camino::Utf8PathBuf;
use sprig_core::error::SprigResult;
use sprig_resolver::{DependencyTree, NodeId};
use std::collections::HashSet;

use super::{load_tree, CommandContext};

pub async fn execute(
    dir: Utf8PathBuf,
    no_dev: bool,
    depth: Option<usize>,
    ctx: &CommandContext,
) -> SprigResult<()> {
    let tree = load_tree(ctx, &dir, no_dev).await?;

    ctx.output.heading(dir.as_str());
    print_tree(&tree, depth, ctx);
    Ok(())
}

pub(crate) fn print_tree(tree: &DependencyTree, depth: Option<usize>, ctx: &CommandContext) {
    if tree.top_level().is_empty() {
        ctx.output.info("(no dependencies)");
        return;
    }
    for line in render(tree, depth) {
        ctx.output.print(&line);
    }
    if let Some(message) = cycle_warning(tree) {
        ctx.output.warn(&message);
    }
}

/// Warning naming one dependency cycle of the tree, if it has any
pub fn cycle_warning(tree: &DependencyTree) -> Option<String> {
    tree.find_cycle()
        .map(|cycle| format!("dependency cycle: {}", DependencyTree::format_cycle(&cycle)))
}

/// Render a tree with box-drawing connectors
///
/// A node printed before is marked `(deduped)` and its children are not
/// repeated. `depth` 0 shows the top level only.
pub fn render(tree: &DependencyTree, depth: Option<usize>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut printed: HashSet<NodeId> = HashSet::new();
    let mut stack: Vec<(NodeId, String, bool, usize)> = Vec::new();
    push_children(&mut stack, tree.top_level(), "", 0);

    while let Some((node, prefix, last, level)) = stack.pop() {
        let connector = if last { "└── " } else { "├── " };
        let label = tree[node]
            .package
            .as_ref()
            .map(|package| package.to_string())
            .unwrap_or_default();

        if !printed.insert(node) {
            lines.push(format!("{}{}{} (deduped)", prefix, connector, label));
            continue;
        }
        lines.push(format!("{}{}{}", prefix, connector, label));

        if depth.map_or(true, |max| level < max) {
            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            push_children(&mut stack, tree.children(node), &child_prefix, level + 1);
        }
    }

    lines
}

fn push_children(
    stack: &mut Vec<(NodeId, String, bool, usize)>,
    children: &[NodeId],
    prefix: &str,
    level: usize,
) {
    let count = children.len();
    for (index, child) in children.iter().enumerate().rev() {
        stack.push((*child, prefix.to_string(), index + 1 == count, level));
    }
}
