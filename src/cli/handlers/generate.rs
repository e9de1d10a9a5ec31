use crate::export::export;
use crate::layout::SpringLayout;
use crate::render::render_graph;
use anyhow::{Context, Result};

use super::CommandContext;

/// Full pipeline: output directory, graph, image, JSON, summary.
pub fn handle_generate(ctx: &CommandContext, skip_image: bool, strict: bool) -> Result<()> {
    let output_dir = ctx.output_dir();
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let (graph, _) = ctx.build_graph(strict)?;

    if !skip_image {
        let image_path = ctx.config.image_path(&ctx.root);
        let layout = SpringLayout::from(&ctx.config.layout);
        render_graph(&graph, &layout, &ctx.config.image, &image_path)
            .with_context(|| format!("Failed to render {}", image_path.display()))?;
        println!("Network visualization saved to {}", image_path.display());
    }

    let data_path = ctx.config.data_path(&ctx.root);
    export(&graph, &data_path)
        .with_context(|| format!("Failed to export {}", data_path.display()))?;
    println!("Network data saved to {}", data_path.display());

    println!(
        "Network has {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    println!("Visualizations saved to {}", output_dir.display());
    Ok(())
}
