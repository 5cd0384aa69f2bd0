//! `sprig nsolid`

use camino::Utf8PathBuf;
use sprig_core::error::SprigResult;

use super::tree::print_tree;
use super::CommandContext;

pub async fn execute(file: Utf8PathBuf, ctx: &CommandContext) -> SprigResult<()> {
    let packages = sprig_config::nsolid::load_from_file(&file).await?;
    let tree = sprig_resolver::from_nsolid(&packages)?;

    if let Some(project) = packages.first() {
        ctx.output.heading(&format!("{}@{}", project.name, project.version));
    }
    print_tree(&tree, None, ctx);
    Ok(())
}
