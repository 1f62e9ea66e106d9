//! Interactive dependency graph on a canvas
//!
//! Layout is recomputed only when the task snapshot changes; viewport and
//! selection live in their own signals, so a new snapshot keeps the current
//! zoom, pan and selection.

use leptos::html::Canvas;
use leptos::prelude::*;
use taskdag_core::render::{legend, zoom_label};
use taskdag_core::viewport::PointerRelease;
use taskdag_core::{
    GraphConfig, GraphLayout, Point, Scene, Selection, TaskId, TaskNode, Viewport, compute_layout_with,
    hit_test, render_scene,
};
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use crate::canvas::{ClearConfig, clear_canvas, draw_scene, get_2d_context};
use crate::error::Result;

#[component]
pub fn GraphView(
    #[prop(into)] tasks: Signal<Vec<TaskNode>>,
    #[prop(optional)] config: GraphConfig,
) -> impl IntoView {
    let layout = Memo::new(move |_| tasks.with(|tasks| compute_layout_with(tasks, &config.layout)));
    let viewport = RwSignal::new(Viewport::new(config.viewport));
    let selection = RwSignal::new(Selection::new());
    let canvas_ref = NodeRef::<Canvas>::new();

    Effect::new(move |_| {
        let scene = layout.with(|layout| {
            viewport.with(|viewport| {
                selection.with(|selection| render_scene(layout, viewport, selection, &config.render))
            })
        });
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        if let Err(err) = redraw(&canvas, &scene) {
            web_sys::console::error_1(&err.to_string().into());
        }
    });

    let on_wheel = move |event: WheelEvent| {
        event.prevent_default();
        viewport.update(|viewport| viewport.on_wheel(event.delta_y()));
    };

    let on_mouse_down = move |event: MouseEvent| {
        if let Some(at) = pointer_position(&event, canvas_ref.get_untracked().as_ref()) {
            viewport.update(|viewport| viewport.on_pointer_down(at.x, at.y));
        }
    };

    let on_mouse_move = move |event: MouseEvent| {
        if let Some(at) = pointer_position(&event, canvas_ref.get_untracked().as_ref()) {
            viewport.maybe_update(|viewport| viewport.on_pointer_move(at.x, at.y));
        }
    };

    let on_mouse_up = move |_: MouseEvent| {
        let release = viewport.try_update(Viewport::on_pointer_up);
        if let Some(PointerRelease::Click { at }) = release {
            let hit = layout.with_untracked(|layout| {
                viewport.with_untracked(|viewport| click_target(layout, viewport, at, &config))
            });
            selection.update(|selection| selection.click(hit));
        }
    };

    let on_mouse_leave = move |_: MouseEvent| {
        viewport.update(Viewport::on_pointer_leave);
    };

    let on_reset = move |_| viewport.update(Viewport::reset);

    view! {
        <div class="graph-view" style="border: 1px solid #e5e7eb; border-radius: 8px; padding: 12px;">
            <h3 style="margin: 0 0 8px 0;">"Dependency Graph"</h3>
            <div style="display: flex; justify-content: space-between; align-items: center; font-size: 12px; color: #4b5563; margin-bottom: 8px;">
                <span class="zoom-indicator">{move || viewport.with(zoom_label)}</span>
                <button
                    class="btn btn-reset"
                    style="padding: 2px 8px; border: 1px solid #d1d5db; border-radius: 4px; background: white; cursor: pointer;"
                    on:click=on_reset
                >
                    "Reset view"
                </button>
            </div>
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                style="width: 100%; height: 400px; cursor: grab; background: white;"
                on:wheel=on_wheel
                on:mousedown=on_mouse_down
                on:mousemove=on_mouse_move
                on:mouseup=on_mouse_up
                on:mouseleave=on_mouse_leave
            ></canvas>
            <p class="legend" style="font-size: 12px; color: #4b5563; margin: 8px 0 0 0;">
                {legend()}
            </p>
        </div>
    }
}

fn redraw(canvas: &HtmlCanvasElement, scene: &Scene) -> Result<()> {
    let context = get_2d_context(canvas)?;
    let clear = ClearConfig::default().with_size(f64::from(canvas.width()), f64::from(canvas.height()));
    clear_canvas(&context, &clear)?;
    draw_scene(&context, scene)
}

/// Pointer position in canvas pixels
///
/// The canvas is stretched by CSS, so client offsets are rescaled to the
/// drawing surface.
fn pointer_position(event: &MouseEvent, canvas: Option<&HtmlCanvasElement>) -> Option<Point> {
    let canvas = canvas?;
    let rect = canvas.get_bounding_client_rect();
    Some(to_surface(
        Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
        Point::new(rect.left(), rect.top()),
        (rect.width(), rect.height()),
        (f64::from(canvas.width()), f64::from(canvas.height())),
    ))
}

/// Maps a client point into surface pixels; a zero-sized box maps 1:1
#[must_use]
pub fn to_surface(
    client: Point,
    origin: Point,
    (css_width, css_height): (f64, f64),
    (surface_width, surface_height): (f64, f64),
) -> Point {
    let scale = |surface: f64, css: f64| if css > 0.0 { surface / css } else { 1.0 };
    let offset = client - origin;
    Point::new(
        offset.x * scale(surface_width, css_width),
        offset.y * scale(surface_height, css_height),
    )
}

/// Task under a click at the screen point `at`
#[must_use]
pub fn click_target(
    layout: &GraphLayout,
    viewport: &Viewport,
    at: Point,
    config: &GraphConfig,
) -> Option<TaskId> {
    hit_test(layout, viewport.screen_to_world(at), &config.render.node_box())
}

#[cfg(test)]
mod tests {
    use taskdag_core::compute_layout;

    use super::*;

    #[test]
    fn test_to_surface_rescales_stretched_canvas() {
        let point = to_surface(
            Point::new(500.0, 300.0),
            Point::new(100.0, 100.0),
            (1600.0, 800.0),
            (800.0, 400.0),
        );
        assert!((point.x - 200.0).abs() < f64::EPSILON);
        assert!((point.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_surface_zero_box_is_identity() {
        let point = to_surface(Point::new(10.0, 20.0), Point::new(0.0, 0.0), (0.0, 0.0), (800.0, 400.0));
        assert_eq!(point, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_click_target_uses_viewport_transform() {
        let layout = compute_layout(&[TaskNode::new(1, "Only")]);
        let config = GraphConfig::default();
        let viewport = Viewport::new(config.viewport);

        // single root sits at world (0, 50), screen (400, 100) at default view
        assert_eq!(
            click_target(&layout, &viewport, Point::new(400.0, 100.0), &config),
            Some(TaskId::new(1))
        );
        assert_eq!(click_target(&layout, &viewport, Point::new(10.0, 10.0), &config), None);
    }
}
