//! # Render surface
//!
//! `render_scene` turns a layout, viewport and selection into a flat list of
//! backend-neutral drawing commands in world coordinates plus the transform to
//! apply. It holds no state: the same inputs always yield the same scene.
//!
//! Draw order is edges (line, then arrowhead) followed by nodes, so nodes
//! always cover edge ends. Backends: [`svg`] here, HTML canvas in the UI crate.

pub mod svg;

use crate::config::RenderConfig;
use crate::geometry::{Rect, arrow_head, edge_segment};
use crate::models::colors::{
    EDGE_COLOR, EDGE_HIGHLIGHT_COLOR, TEXT_COLOR, status_color, status_color_name,
};
use crate::models::{Edge, GraphLayout, LaidOutNode, Point, RgbColor, TaskStatus};
use crate::selection::{Focus, Selection};
use crate::viewport::{Transform, Viewport};

/// Suffix appended to truncated titles
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Soft shadow drawn around the selected node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: RgbColor,
    pub blur: f64,
}

/// One backend-neutral drawing primitive, in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        color: RgbColor,
        width: f64,
        opacity: f64,
    },
    /// Filled polygon (arrowheads)
    Polygon {
        points: Vec<Point>,
        fill: RgbColor,
        opacity: f64,
    },
    /// Rounded rectangle (node body)
    Rect {
        rect: Rect,
        corner_radius: f64,
        fill: RgbColor,
        stroke: RgbColor,
        stroke_width: f64,
        opacity: f64,
        glow: Option<Glow>,
    },
    Text {
        position: Point,
        text: String,
        color: RgbColor,
        font_size: f64,
        weight: FontWeight,
        align: TextAlign,
        opacity: f64,
    },
}

/// Everything a backend needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub transform: Transform,
    pub commands: Vec<DrawCommand>,
}

/// Builds the drawing commands for one frame
#[must_use]
pub fn render_scene(
    layout: &GraphLayout,
    viewport: &Viewport,
    selection: &Selection,
    config: &RenderConfig,
) -> Scene {
    let focus = Focus::new(selection, layout, config.dim_opacity);
    let mut commands = Vec::with_capacity(layout.edges.len() * 2 + layout.nodes.len() * 3);

    for edge in &layout.edges {
        commands.extend(edge_commands(edge, &focus, config));
    }
    for node in &layout.nodes {
        commands.extend(node_commands(node, &focus, config));
    }

    Scene {
        transform: viewport.transform(),
        commands,
    }
}

fn edge_commands(edge: &Edge, focus: &Focus, config: &RenderConfig) -> Vec<DrawCommand> {
    let opacity = focus.edge_opacity(edge);
    let (color, width) = if focus.is_edge_highlighted(edge) {
        (EDGE_HIGHLIGHT_COLOR, config.highlight_edge_width)
    } else {
        (EDGE_COLOR, config.edge_width)
    };

    let (start, end) = edge_segment(edge.from, edge.to, &config.node_box());
    let mut commands = vec![DrawCommand::Line {
        from: start,
        to: end,
        color,
        width,
        opacity,
    }];

    // Degenerate segments (self edges) have no direction to point
    if let Ok(arrow) = arrow_head(end, end - start, config.arrow_length, config.arrow_width) {
        commands.push(DrawCommand::Polygon {
            points: arrow.points().to_vec(),
            fill: color,
            opacity,
        });
    }

    commands
}

fn node_commands(node: &LaidOutNode, focus: &Focus, config: &RenderConfig) -> [DrawCommand; 3] {
    let id = node.id();
    let status = node.task.status;
    let color = status_color(status);
    let opacity = focus.node_opacity(id);
    let center = node.position;

    let glow = focus.is_selected(id).then_some(Glow {
        color,
        blur: config.glow_blur,
    });

    [
        DrawCommand::Rect {
            rect: config.node_box().rect_at(center),
            corner_radius: config.corner_radius,
            fill: RgbColor::WHITE,
            stroke: color,
            stroke_width: config.node_stroke_width,
            opacity,
            glow,
        },
        DrawCommand::Text {
            position: Point::new(center.x, center.y - config.node_height / 10.0),
            text: truncate_title(&node.task.title, config.title_max_chars),
            color: TEXT_COLOR,
            font_size: config.title_font_size,
            weight: FontWeight::Bold,
            align: TextAlign::Center,
            opacity,
        },
        DrawCommand::Text {
            position: Point::new(center.x, center.y + config.node_height / 4.0),
            text: status.label().to_string(),
            color,
            font_size: config.status_font_size,
            weight: FontWeight::Normal,
            align: TextAlign::Center,
            opacity,
        },
    ]
}

/// Cuts `title` to `max_chars` characters, appending an ellipsis when cut
///
/// Counts `char`s, so multi-byte titles are never split inside a character.
///
/// ```
/// use taskdag_core::render::truncate_title;
///
/// assert_eq!(truncate_title("Write docs", 15), "Write docs");
/// assert_eq!(truncate_title("Implement OAuth login", 15), "Implement OAuth...");
/// ```
#[must_use]
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    match title.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", title.get(..cut).unwrap_or(title)),
        None => title.to_string(),
    }
}

/// Status color legend for the host UI
#[must_use]
pub fn legend() -> String {
    TaskStatus::ALL
        .iter()
        .map(|status| format!("{}: {}", status_color_name(*status), status.label()))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Zoom indicator text, e.g. `Zoom: 110%`
#[must_use]
pub fn zoom_label(viewport: &Viewport) -> String {
    format!("Zoom: {}%", viewport.zoom_percent())
}
