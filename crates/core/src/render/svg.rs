//! SVG backend for [`Scene`]

use super::{DrawCommand, FontWeight, Scene, TextAlign};
use crate::models::Point;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Serializes a scene into a standalone SVG document
#[must_use]
pub fn to_svg(scene: &Scene, width: f64, height: f64) -> String {
    let mut out = format!(
        "<svg xmlns=\"{SVG_NS}\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
    );
    out.push_str(&format!(
        "  <g transform=\"{}\">\n",
        scene.transform.to_svg()
    ));
    for command in &scene.commands {
        out.push_str("    ");
        out.push_str(&element(command));
        out.push('\n');
    }
    out.push_str("  </g>\n</svg>\n");
    out
}

fn element(command: &DrawCommand) -> String {
    match command {
        DrawCommand::Line {
            from,
            to,
            color,
            width,
            opacity,
        } => format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{width}\" opacity=\"{opacity}\"/>",
            from.x,
            from.y,
            to.x,
            to.y,
            color.to_hex()
        ),
        DrawCommand::Polygon {
            points,
            fill,
            opacity,
        } => format!(
            "<polygon points=\"{}\" fill=\"{}\" opacity=\"{opacity}\"/>",
            polygon_points(points),
            fill.to_hex()
        ),
        DrawCommand::Rect {
            rect,
            corner_radius,
            fill,
            stroke,
            stroke_width,
            opacity,
            glow,
        } => {
            let style = glow.map_or_else(String::new, |glow| {
                format!(
                    " style=\"filter: drop-shadow(0 0 {}px {})\"",
                    glow.blur / 2.0,
                    glow.color.to_hex()
                )
            });
            format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{corner_radius}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{stroke_width}\" opacity=\"{opacity}\"{style}/>",
                rect.min.x,
                rect.min.y,
                rect.width(),
                rect.height(),
                fill.to_hex(),
                stroke.to_hex()
            )
        }
        DrawCommand::Text {
            position,
            text,
            color,
            font_size,
            weight,
            align,
            opacity,
        } => format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"{}\" dominant-baseline=\"middle\" font-size=\"{font_size}\" font-weight=\"{}\" fill=\"{}\" opacity=\"{opacity}\">{}</text>",
            position.x,
            position.y,
            anchor(*align),
            weight_name(*weight),
            color.to_hex(),
            escape_xml(text)
        ),
    }
}

fn polygon_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

const fn anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

const fn weight_name(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => "normal",
        FontWeight::Bold => "bold",
    }
}

/// Escapes text content and attribute values
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
