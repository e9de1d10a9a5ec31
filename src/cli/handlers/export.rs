use crate::export::{NetworkDocument, export};
use anyhow::{Context, Result};
use std::path::PathBuf;

use super::CommandContext;

pub fn handle_export(ctx: &CommandContext, output: Option<PathBuf>, stdout: bool) -> Result<()> {
    let (graph, _) = ctx.build_graph(false)?;

    if stdout {
        println!("{}", NetworkDocument::from_graph(&graph).to_json()?);
        return Ok(());
    }

    let data_path = match output {
        Some(path) => path,
        None => {
            let output_dir = ctx.output_dir();
            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("Failed to create {}", output_dir.display()))?;
            ctx.config.data_path(&ctx.root)
        }
    };

    export(&graph, &data_path)
        .with_context(|| format!("Failed to export {}", data_path.display()))?;
    println!("Network data saved to {}", data_path.display());
    Ok(())
}
