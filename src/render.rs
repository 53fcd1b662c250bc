use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::layout::{Layout, Point, PositionedEdge, PositionedNode};
use crate::path::{PathBuilder, fmt_num};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const LABEL_PAD_X: f32 = 6.0;
const LABEL_PAD_Y: f32 = 4.0;
/// Average glyph width relative to the font size, for label boxes and truncation.
const GLYPH_WIDTH_RATIO: f32 = 0.6;

/// Supplies the text drawn on nodes and edges.
pub trait LabelSource<T, E> {
    fn node_label(&self, node: &PositionedNode<T>) -> String;

    fn edge_label(&self, _edge: &PositionedEdge<E>) -> Option<String> {
        None
    }
}

/// Labels nodes with their ids; edges stay unlabelled.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdLabels;

impl<T, E> LabelSource<T, E> for IdLabels {
    fn node_label(&self, node: &PositionedNode<T>) -> String {
        node.id.clone()
    }
}

/// Reads a `label` string from JSON payloads, falling back to the node id.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLabels;

impl LabelSource<serde_json::Value, serde_json::Value> for JsonLabels {
    fn node_label(&self, node: &PositionedNode<serde_json::Value>) -> String {
        node.data
            .get("label")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| node.id.clone())
    }

    fn edge_label(&self, edge: &PositionedEdge<serde_json::Value>) -> Option<String> {
        edge.data
            .as_ref()?
            .get("label")
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }
}

/// Renders with the edge style from `config`.
pub fn render_svg<T, E>(
    layout: &Layout<T, E>,
    theme: &Theme,
    config: &RenderConfig,
    labels: &dyn LabelSource<T, E>,
) -> String {
    let path_builder = config.path_builder();
    render_svg_with(layout, theme, config, labels, path_builder.as_ref())
}

/// Renders boxes and connectors, drawing every edge with `path_builder`.
pub fn render_svg_with<T, E>(
    layout: &Layout<T, E>,
    theme: &Theme,
    config: &RenderConfig,
    labels: &dyn LabelSource<T, E>,
    path_builder: &dyn PathBuilder,
) -> String {
    let width = config.width.max(1.0);
    let height = config.height.max(1.0);
    let camera = config.camera.unwrap_or_else(|| match layout.bounds() {
        Some(bounds) => Camera::fit(bounds, width, height, config.padding),
        None => Camera::default(),
    });

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        config.background
    ));
    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        theme.line_color
    ));
    svg.push_str("</defs>");
    svg.push_str(&format!(
        "<g class=\"viewport\" transform=\"{}\">",
        camera.transform()
    ));

    svg.push_str("<g class=\"edges\">");
    for edge in &layout.edges {
        let path = path_builder.build(edge.source, edge.target, Some(layout.direction));
        svg.push_str(&format!(
            "<path id=\"{}\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.4\" marker-end=\"url(#arrow)\"/>",
            escape_xml(&edge.id),
            path.to_svg(),
            theme.line_color
        ));
        if let Some(label) = labels.edge_label(edge) {
            let mid = edge.source.midpoint(edge.target);
            svg.push_str(&edge_label_svg(mid, &label, theme));
        }
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"nodes\">");
    for node in &layout.nodes {
        let size = node.size_or(layout.node_size);
        let left = node.x - size.width / 2.0;
        let top = node.y - size.height / 2.0;
        svg.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
            fmt_num(left),
            fmt_num(top),
            fmt_num(size.width),
            fmt_num(size.height),
            theme.primary_color,
            theme.primary_border_color,
            r = fmt_num(config.corner_radius),
        ));
        let label = fit_label(&labels.node_label(node), size.width, theme.font_size);
        svg.push_str(&text_svg(node.center(), &label, theme));
    }
    svg.push_str("</g>");

    svg.push_str("</g></svg>");
    svg
}

fn text_svg(at: Point, text: &str, theme: &Theme) -> String {
    format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        fmt_num(at.x),
        fmt_num(at.y),
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.primary_text_color,
        escape_xml(text)
    )
}

fn edge_label_svg(at: Point, label: &str, theme: &Theme) -> String {
    let text_w = label.chars().count() as f32 * theme.font_size * GLYPH_WIDTH_RATIO;
    let rect_w = text_w + LABEL_PAD_X * 2.0;
    let rect_h = theme.font_size + LABEL_PAD_Y * 2.0;
    let mut out = format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"4\" ry=\"4\" fill=\"{}\" stroke=\"{}\" stroke-width=\"0.8\"/>",
        fmt_num(at.x - rect_w / 2.0),
        fmt_num(at.y - rect_h / 2.0),
        fmt_num(rect_w),
        fmt_num(rect_h),
        theme.edge_label_background,
        theme.primary_border_color
    );
    out.push_str(&text_svg(at, label, theme));
    out
}

/// Truncates with an ellipsis when the estimated text width exceeds the box.
fn fit_label(label: &str, box_width: f32, font_size: f32) -> String {
    let glyph = (font_size * GLYPH_WIDTH_RATIO).max(1.0);
    let max_chars = ((box_width - LABEL_PAD_X * 2.0) / glyph).floor().max(1.0) as usize;
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut out: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
