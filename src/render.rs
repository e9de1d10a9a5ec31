//! Raster rendering of the pattern graph with the plotters bitmap backend.
//!
//! Sizes follow print conventions: the canvas is given in inches at a DPI,
//! and strokes, markers and fonts in points (1/72 in).

use crate::config::ImageSettings;
use crate::error::{NetworkError, Result};
use crate::graph::PatternGraph;
use crate::layout::{Layout, SpringLayout};
use crate::model::Category;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const TITLE: &str = "Pattern Relationship Network";

const TITLE_PT: f64 = 20.0;
const LABEL_PT: f64 = 10.0;
const LEGEND_PT: f64 = 12.0;
/// Marker area in pt², as matplotlib's `node_size`.
const NODE_AREA_PT2: f64 = 2000.0;
const NODE_ALPHA: f64 = 0.8;
const EDGE_WIDTH_PT: f64 = 1.5;
const EDGE_ALPHA: f64 = 0.7;

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT_REGISTERED: OnceLock<bool> = OnceLock::new();

fn render_err<E: std::fmt::Display>(err: E) -> NetworkError {
    NetworkError::Render(err.to_string())
}

fn font_candidates(settings: &ImageSettings) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(ref font) = settings.font {
        candidates.push(PathBuf::from(font));
    }
    candidates.extend(FONT_CANDIDATES.iter().map(PathBuf::from));
    candidates
}

/// Register a sans-serif font with plotters. Returns whether text can be drawn.
fn ensure_font(settings: &ImageSettings) -> bool {
    *FONT_REGISTERED.get_or_init(|| {
        for path in font_candidates(settings) {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            if plotters::style::register_font("sans-serif", FontStyle::Normal, bytes).is_ok() {
                tracing::debug!(font = %path.display(), "Registered label font");
                return true;
            }
            tracing::debug!(font = %path.display(), "Skipping unreadable font");
        }
        tracing::warn!("No usable TrueType font found; rendering without text");
        false
    })
}

fn font(size_px: f64) -> TextStyle<'static> {
    TextStyle::from(FontDesc::new(FontFamily::SansSerif, size_px, FontStyle::Normal))
}

fn category_color(category: Category) -> RGBColor {
    let (r, g, b) = category.rgb();
    RGBColor(r, g, b)
}

/// Maps layout coordinates in `[-1, 1]²` onto a pixel rectangle, y up.
struct Viewport {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    fn project(&self, (x, y): (f64, f64)) -> (i32, i32) {
        let px = self.left + (x + 1.0) / 2.0 * self.width;
        let py = self.top + (1.0 - (y + 1.0) / 2.0) * self.height;
        (px.round() as i32, py.round() as i32)
    }
}

/// Draw `graph` at the positions in `layout` and write a PNG to `path`.
///
/// The parent directory of `path` must exist.
pub fn render(
    graph: &PatternGraph,
    layout: &Layout,
    settings: &ImageSettings,
    path: &Path,
) -> Result<()> {
    settings.validate()?;
    if layout.len() != graph.node_count() {
        return Err(NetworkError::Render(format!(
            "layout has {} positions for {} nodes",
            layout.len(),
            graph.node_count()
        )));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        return Err(NetworkError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("output directory {} does not exist", parent.display()),
        )));
    }

    let with_text = ensure_font(settings);
    let (width, height) = settings.pixel_size();
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    draw_network(&root, graph, layout, settings, with_text)?;

    root.present().map_err(render_err)?;
    tracing::info!(
        path = %path.display(),
        width,
        height,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Wrote network visualization"
    );
    Ok(())
}

/// Plot area for node centres, inside the title band and node-sized margins.
fn viewport(settings: &ImageSettings) -> Viewport {
    let (width, height) = settings.pixel_size();
    let node_radius = settings.points_to_px(NODE_AREA_PT2.sqrt() / 2.0);
    let top_margin = settings.points_to_px(TITLE_PT) * 2.5;
    let side_margin = node_radius * 2.0;
    Viewport {
        left: side_margin,
        top: top_margin,
        width: (f64::from(width) - 2.0 * side_margin).max(1.0),
        height: (f64::from(height) - top_margin - side_margin).max(1.0),
    }
}

fn draw_network(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    graph: &PatternGraph,
    layout: &Layout,
    settings: &ImageSettings,
    with_text: bool,
) -> Result<()> {
    let (width, _) = root.dim_in_pixel();
    let px = |pt: f64| settings.points_to_px(pt);
    root.fill(&WHITE).map_err(render_err)?;

    let viewport = viewport(settings);
    let points: Vec<(i32, i32)> = layout
        .positions()
        .iter()
        .map(|&p| viewport.project(p))
        .collect();

    let edge_style = BLACK
        .mix(EDGE_ALPHA)
        .stroke_width(px(EDGE_WIDTH_PT).round().max(1.0) as u32);
    for (a, b) in graph.edge_positions() {
        if a == b {
            continue;
        }
        root.draw(&PathElement::new(vec![points[a], points[b]], edge_style))
            .map_err(render_err)?;
    }

    let radius = px(NODE_AREA_PT2.sqrt() / 2.0).round().max(1.0) as u32;
    for category in Category::ALL {
        let style = category_color(category).mix(NODE_ALPHA).filled();
        for (idx, node) in graph.nodes().enumerate() {
            if node.category == category {
                root.draw(&Circle::new(points[idx], radius, style))
                    .map_err(render_err)?;
            }
        }
    }

    if with_text {
        let label_style = font(px(LABEL_PT)).pos(Pos::new(HPos::Center, VPos::Center));
        for (idx, node) in graph.nodes().enumerate() {
            root.draw(&Text::new(node.name.clone(), points[idx], label_style.clone()))
                .map_err(render_err)?;
        }

        let title_px = px(TITLE_PT);
        let title_style = font(title_px).pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            TITLE,
            ((width / 2) as i32, (title_px * 1.25).round() as i32),
            title_style,
        ))
        .map_err(render_err)?;
    }

    draw_legend(root, graph, settings, with_text)
}

/// Compute the layout with `layout` and render.
pub fn render_graph(
    graph: &PatternGraph,
    layout: &SpringLayout,
    settings: &ImageSettings,
    path: &Path,
) -> Result<()> {
    let positions = layout.compute(graph)?;
    render(graph, &positions, settings, path)
}

fn draw_legend(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    graph: &PatternGraph,
    settings: &ImageSettings,
    with_text: bool,
) -> Result<()> {
    let present: Vec<Category> = Category::ALL
        .into_iter()
        .filter(|&c| graph.nodes_in(c).next().is_some())
        .collect();
    if present.is_empty() {
        return Ok(());
    }

    let font_px = settings.points_to_px(LEGEND_PT);
    let style = font(font_px).pos(Pos::new(HPos::Left, VPos::Center));
    let row_height = font_px * 1.8;
    let marker = (font_px * 0.5).round().max(1.0) as i32;
    let padding = font_px * 0.6;

    let mut text_width = 0u32;
    if with_text {
        for category in &present {
            let (w, _) = root
                .estimate_text_size(category.label(), &style)
                .map_err(render_err)?;
            text_width = text_width.max(w);
        }
    }

    let (canvas_width, _) = root.dim_in_pixel();
    let box_width = padding * 3.0 + f64::from(marker) * 2.0 + f64::from(text_width);
    let box_height = padding * 2.0 + row_height * present.len() as f64;
    let right = f64::from(canvas_width) - padding * 2.0;
    let left = right - box_width;
    let top = settings.points_to_px(TITLE_PT) * 2.5;

    root.draw(&Rectangle::new(
        [
            (left.round() as i32, top.round() as i32),
            (right.round() as i32, (top + box_height).round() as i32),
        ],
        WHITE.mix(0.8).filled(),
    ))
    .map_err(render_err)?;
    root.draw(&Rectangle::new(
        [
            (left.round() as i32, top.round() as i32),
            (right.round() as i32, (top + box_height).round() as i32),
        ],
        RGBColor(0xCC, 0xCC, 0xCC).stroke_width(1),
    ))
    .map_err(render_err)?;

    for (row, category) in present.iter().enumerate() {
        let cy = (top + padding + row_height * (row as f64 + 0.5)).round() as i32;
        let cx = (left + padding + f64::from(marker)).round() as i32;
        root.draw(&Circle::new(
            (cx, cy),
            marker as u32,
            category_color(*category).mix(NODE_ALPHA).filled(),
        ))
        .map_err(render_err)?;
        if with_text {
            let tx = cx + marker + padding.round() as i32;
            root.draw(&Text::new(category.label(), (tx, cy), style.clone()))
                .map_err(render_err)?;
        }
    }
    Ok(())
}
