use crate::config::RenderConfig;
use crate::layout::{ChordLayout, Point};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Extent of the unit-circle plane that has to stay visible.
const PLANE_EXTENT: f32 = 1.1;

pub fn render_svg(layout: &ChordLayout, theme: &Theme, config: &RenderConfig) -> String {
    render_svg_with_title(layout, theme, config, None)
}

pub fn render_svg_with_title(
    layout: &ChordLayout,
    theme: &Theme,
    config: &RenderConfig,
    title: Option<&str>,
) -> String {
    let mut svg = String::new();
    let width = config.width.max(100.0);
    let height = config.height.max(100.0);
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let reach = if config.show_labels {
        PLANE_EXTENT.max(config.label_radius) + 0.1
    } else {
        PLANE_EXTENT
    };
    let scale = ((width.min(height) / 2.0 - config.margin) / reach).max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        config.background
    ));

    if let Some(title) = title {
        svg.push_str(&format!(
            "<text x=\"{center_x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            config.margin * 0.8,
            escape_xml(&theme.font_family),
            theme.font_size * 1.4,
            theme.text_color,
            escape_xml(title)
        ));
    }

    // unit plane, y axis up
    svg.push_str(&format!(
        "<g transform=\"translate({center_x:.2} {center_y:.2}) scale({scale:.4} {:.4})\">",
        -scale
    ));
    for shape in &layout.shapes {
        svg.push_str(&format!(
            "<path class=\"{}\" d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" vector-effect=\"non-scaling-stroke\"/>",
            shape_class(shape.kind),
            shape.path,
            shape.fill_color,
            shape.stroke_color,
            shape.stroke_width
        ));
    }
    svg.push_str("</g>");

    for annotation in &layout.annotations {
        let (x, y) = to_canvas(Point::new(annotation.x, annotation.y), center_x, center_y, scale);
        svg.push_str(&format!(
            "<circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"3\" fill=\"{}\" fill-opacity=\"0\"><title>{}</title></circle>",
            annotation.color,
            escape_xml(&annotation.text)
        ));
    }

    if config.show_labels {
        for ideogram in &layout.ideograms {
            let angle = ideogram.end.midpoint();
            let anchor = Point::polar(config.label_radius as f64, angle);
            let (x, y) = to_canvas(anchor, center_x, center_y, scale);
            let text_anchor = if anchor.x.abs() < 0.1 {
                "middle"
            } else if anchor.x > 0.0 {
                "start"
            } else {
                "end"
            };
            svg.push_str(&format!(
                "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{text_anchor}\" dominant-baseline=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                escape_xml(&theme.font_family),
                theme.font_size,
                theme.text_color,
                escape_xml(&ideogram.label)
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}

fn shape_class(kind: crate::layout::ShapeKind) -> &'static str {
    match kind {
        crate::layout::ShapeKind::Ideogram => "ideogram",
        crate::layout::ShapeKind::Ribbon => "ribbon",
        crate::layout::ShapeKind::SelfRelation => "self-relation",
    }
}

fn to_canvas(point: Point, center_x: f32, center_y: f32, scale: f32) -> (f32, f32) {
    (
        center_x + point.x as f32 * scale,
        center_y - point.y as f32 * scale,
    )
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
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("invalid canvas size"))?;

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
