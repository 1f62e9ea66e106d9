//! Scene executor for `CanvasRenderingContext2d`
//!
//! The core hands over world-space commands plus one transform; the transform
//! is installed once and every command is drawn in order. Later commands
//! paint over earlier ones, so nodes sit on top of edges.

use taskdag_core::geometry::Rect;
use taskdag_core::models::RgbColor;
use taskdag_core::render::{DrawCommand, FontWeight, Glow, Scene, TextAlign};
use taskdag_core::viewport::Transform;
use web_sys::CanvasRenderingContext2d;

use crate::error::{Result, UiError};

/// Draws every command of `scene`
///
/// # Errors
///
/// Returns `UiError::Canvas` if the context rejects a transform, path or text
/// call. Drawing stops at the first failure.
pub fn draw_scene(context: &CanvasRenderingContext2d, scene: &Scene) -> Result<()> {
    apply_transform(context, &scene.transform)?;
    for command in &scene.commands {
        draw_command(context, command)?;
    }
    context.set_global_alpha(1.0);
    Ok(())
}

fn apply_transform(context: &CanvasRenderingContext2d, transform: &Transform) -> Result<()> {
    context
        .set_transform(
            transform.scale,
            0.0,
            0.0,
            transform.scale,
            transform.translate_x,
            transform.translate_y,
        )
        .map_err(|e| UiError::Canvas(format!("Failed to set transform: {e:?}")))
}

fn draw_command(context: &CanvasRenderingContext2d, command: &DrawCommand) -> Result<()> {
    match command {
        DrawCommand::Line {
            from,
            to,
            color,
            width,
            opacity,
        } => {
            context.set_global_alpha(*opacity);
            context.begin_path();
            context.move_to(from.x, from.y);
            context.line_to(to.x, to.y);
            context.set_stroke_style_str(&color.to_css());
            context.set_line_width(*width);
            context.stroke();
            Ok(())
        }

        DrawCommand::Polygon {
            points,
            fill,
            opacity,
        } => {
            let Some((first, rest)) = points.split_first() else {
                return Ok(());
            };
            context.set_global_alpha(*opacity);
            context.begin_path();
            context.move_to(first.x, first.y);
            for point in rest {
                context.line_to(point.x, point.y);
            }
            context.close_path();
            context.set_fill_style_str(&fill.to_css());
            context.fill();
            Ok(())
        }

        DrawCommand::Rect {
            rect,
            corner_radius,
            fill,
            stroke,
            stroke_width,
            opacity,
            glow,
        } => {
            context.set_global_alpha(*opacity);
            rounded_rect_path(context, rect, *corner_radius)?;

            set_glow(context, glow.as_ref());
            context.set_fill_style_str(&fill.to_css());
            context.fill();
            set_glow(context, None);

            context.set_stroke_style_str(&stroke.to_css());
            context.set_line_width(*stroke_width);
            context.stroke();
            Ok(())
        }

        DrawCommand::Text {
            position,
            text,
            color,
            font_size,
            weight,
            align,
            opacity,
        } => {
            context.set_global_alpha(*opacity);
            context.set_font(&font_shorthand(*weight, *font_size));
            context.set_text_align(align_keyword(*align));
            context.set_text_baseline("middle");
            context.set_fill_style_str(&color.to_css());
            context
                .fill_text(text, position.x, position.y)
                .map_err(|e| UiError::Canvas(format!("Failed to draw text: {e:?}")))
        }
    }
}

fn rounded_rect_path(context: &CanvasRenderingContext2d, rect: &Rect, radius: f64) -> Result<()> {
    let r = clamp_radius(rect, radius);
    let (left, top, right, bottom) = (rect.min.x, rect.min.y, rect.max.x, rect.max.y);

    context.begin_path();
    context.move_to(left + r, top);
    let corners = [
        (right, top, right, bottom),
        (right, bottom, left, bottom),
        (left, bottom, left, top),
        (left, top, right, top),
    ];
    for (x1, y1, x2, y2) in corners {
        context
            .arc_to(x1, y1, x2, y2, r)
            .map_err(|e| UiError::Canvas(format!("Failed to build node outline: {e:?}")))?;
    }
    context.close_path();
    Ok(())
}

fn set_glow(context: &CanvasRenderingContext2d, glow: Option<&Glow>) {
    match glow {
        Some(glow) => {
            context.set_shadow_color(&glow.color.to_css());
            context.set_shadow_blur(glow.blur);
        }
        None => {
            context.set_shadow_color(&RgbColor::WHITE.to_css());
            context.set_shadow_blur(0.0);
        }
    }
}

/// Radius that still fits inside `rect`
#[must_use]
pub fn clamp_radius(rect: &Rect, radius: f64) -> f64 {
    radius
        .max(0.0)
        .min(rect.width() / 2.0)
        .min(rect.height() / 2.0)
}

/// CSS font shorthand, e.g. `bold 12px sans-serif`
#[must_use]
pub fn font_shorthand(weight: FontWeight, size: f64) -> String {
    let weight = match weight {
        FontWeight::Normal => "normal",
        FontWeight::Bold => "bold",
    };
    format!("{weight} {size}px sans-serif")
}

#[must_use]
pub const fn align_keyword(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
    }
}

#[cfg(test)]
mod tests {
    use taskdag_core::Point;

    use super::*;

    #[test]
    fn test_font_shorthand() {
        assert_eq!(font_shorthand(FontWeight::Bold, 12.0), "bold 12px sans-serif");
        assert_eq!(font_shorthand(FontWeight::Normal, 10.0), "normal 10px sans-serif");
    }

    #[test]
    fn test_align_keyword() {
        assert_eq!(align_keyword(TextAlign::Center), "center");
        assert_eq!(align_keyword(TextAlign::Left), "left");
    }

    #[test]
    fn test_clamp_radius() {
        let rect = Rect::new(Point::new(0.0, 0.0), Point::new(120.0, 40.0));
        assert!((clamp_radius(&rect, 5.0) - 5.0).abs() < f64::EPSILON);
        assert!((clamp_radius(&rect, 50.0) - 20.0).abs() < f64::EPSILON);
        assert!(clamp_radius(&rect, -3.0).abs() < f64::EPSILON);
    }
}
