use crate::layout::SpringLayout;
use crate::render::render_graph;
use anyhow::{Context, Result};
use std::path::PathBuf;

use super::CommandContext;

pub fn handle_render(ctx: &CommandContext, output: Option<PathBuf>) -> Result<()> {
    let image_path = match output {
        Some(path) => path,
        None => {
            let output_dir = ctx.output_dir();
            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("Failed to create {}", output_dir.display()))?;
            ctx.config.image_path(&ctx.root)
        }
    };

    let (graph, _) = ctx.build_graph(false)?;
    let layout = SpringLayout::from(&ctx.config.layout);
    render_graph(&graph, &layout, &ctx.config.image, &image_path)
        .with_context(|| format!("Failed to render {}", image_path.display()))?;

    println!("Network visualization saved to {}", image_path.display());
    Ok(())
}
