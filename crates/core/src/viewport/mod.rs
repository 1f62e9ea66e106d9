//! # Viewport controller
//!
//! Owns pan and zoom and turns wheel and pointer input into the affine
//! transform `translate(origin + pan) -> scale(zoom)`.
//!
//! The viewport is independent of the layout: recomputing the layout never
//! touches it, so the user's frame of reference survives a data refresh.

mod pan;
mod zoom;

pub use pan::{DragState, PanOffset, PointerRelease, end_drag, start_drag, update_drag};
pub use zoom::{MAX_ZOOM, MIN_ZOOM, ZoomLevel};

use thiserror::Error;

use crate::config::ViewportConfig;
use crate::models::Point;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ViewportError {
    #[error("zoom level must be a finite number, got {0}")]
    NonFiniteZoom(f64),
}

/// Affine world-to-screen transform
///
/// `screen = translate + world * scale`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Transform {
    #[must_use]
    pub fn apply(&self, world: Point) -> Point {
        Point::new(
            world.x.mul_add(self.scale, self.translate_x),
            world.y.mul_add(self.scale, self.translate_y),
        )
    }

    #[must_use]
    pub fn invert(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.translate_x) / self.scale,
            (screen.y - self.translate_y) / self.scale,
        )
    }

    /// SVG `transform` attribute value
    #[must_use]
    pub fn to_svg(&self) -> String {
        format!(
            "translate({}, {}) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Pan/zoom state for one graph view
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: ZoomLevel,
    pan: PanOffset,
    drag: DragState,
    config: ViewportConfig,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl Viewport {
    #[must_use]
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            zoom: ZoomLevel::default(),
            pan: PanOffset::default(),
            drag: DragState::Idle,
            config,
        }
    }

    #[must_use]
    pub const fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    #[must_use]
    pub const fn pan(&self) -> PanOffset {
        self.pan
    }

    #[must_use]
    pub const fn drag(&self) -> DragState {
        self.drag
    }

    #[must_use]
    pub const fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Sets the zoom directly, clamped to the configured bounds
    ///
    /// # Errors
    ///
    /// Returns `ViewportError::NonFiniteZoom` for NaN or infinite input.
    pub fn set_zoom(&mut self, value: f64) -> Result<(), ViewportError> {
        self.zoom = ZoomLevel::within(value, self.config.min_zoom, self.config.max_zoom)?;
        Ok(())
    }

    pub const fn set_pan(&mut self, pan: PanOffset) {
        self.pan = pan;
    }

    /// Applies one wheel notch
    ///
    /// Scrolling up (`delta_y < 0`) zooms in by the step factor, scrolling down
    /// zooms out. A zero or non-finite delta does nothing.
    pub fn on_wheel(&mut self, delta_y: f64) {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return;
        }
        let factor = if delta_y < 0.0 {
            self.config.zoom_step
        } else {
            self.config.zoom_step.recip()
        };
        self.zoom = self
            .zoom
            .scaled(factor, self.config.min_zoom, self.config.max_zoom);
    }

    /// Starts a drag at the screen position
    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        self.drag = start_drag(self.pan, Point::new(x, y));
    }

    /// Moves the pan with the pointer while dragging
    ///
    /// Returns `true` when the pan changed.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> bool {
        match update_drag(self.drag, Point::new(x, y), self.config.click_slop) {
            Some((pan, drag)) => {
                let changed = pan != self.pan;
                self.pan = pan;
                self.drag = drag;
                changed
            }
            None => false,
        }
    }

    /// Ends the drag and reports whether it was a click or a pan
    pub fn on_pointer_up(&mut self) -> PointerRelease {
        let release = end_drag(self.drag);
        self.drag = DragState::Idle;
        release
    }

    /// Ends the drag without producing a click
    pub const fn on_pointer_leave(&mut self) {
        self.drag = DragState::Idle;
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform {
            translate_x: self.config.origin_x + self.pan.x(),
            translate_y: self.config.origin_y + self.pan.y(),
            scale: self.zoom.value(),
        }
    }

    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.transform().invert(screen)
    }

    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.transform().apply(world)
    }

    /// Zoom as a rounded percentage for the zoom indicator
    #[must_use]
    pub fn zoom_percent(&self) -> i64 {
        self.zoom.percent()
    }

    /// Back to 100% zoom with no pan
    pub fn reset(&mut self) {
        self.zoom = ZoomLevel::default();
        self.pan = PanOffset::default();
        self.drag = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_wheel_up_zooms_in() {
        let mut viewport = Viewport::default();
        viewport.on_wheel(-100.0);
        assert!(approx(viewport.zoom().value(), 1.1));
        assert_eq!(viewport.zoom_percent(), 110);
    }

    #[test]
    fn test_wheel_down_zooms_out() {
        let mut viewport = Viewport::default();
        viewport.on_wheel(100.0);
        assert!(approx(viewport.zoom().value(), 1.0 / 1.1));
    }

    #[test]
    fn test_zero_and_nan_delta_are_ignored() {
        let mut viewport = Viewport::default();
        viewport.on_wheel(0.0);
        viewport.on_wheel(f64::NAN);
        assert!(approx(viewport.zoom().value(), 1.0));
    }

    #[test]
    fn test_zoom_clamped_after_many_notches() {
        let mut viewport = Viewport::default();
        for _ in 0..100 {
            viewport.on_wheel(-1.0);
        }
        assert!(approx(viewport.zoom().value(), MAX_ZOOM));
        for _ in 0..200 {
            viewport.on_wheel(1.0);
        }
        assert!(approx(viewport.zoom().value(), MIN_ZOOM));
    }

    #[test]
    fn test_transform_composition() {
        let mut viewport = Viewport::default();
        viewport.set_pan(PanOffset::new(20.0, -10.0));
        viewport.set_zoom(2.0).unwrap();

        let transform = viewport.transform();
        assert!(approx(transform.translate_x, 420.0));
        assert!(approx(transform.translate_y, 40.0));
        assert!(approx(transform.scale, 2.0));

        let screen = viewport.world_to_screen(Point::new(10.0, 5.0));
        assert!(approx(screen.x, 440.0));
        assert!(approx(screen.y, 50.0));

        let world = viewport.screen_to_world(screen);
        assert!(approx(world.x, 10.0));
        assert!(approx(world.y, 5.0));
    }

    #[test]
    fn test_pan_tracks_pointer_under_zoom() {
        let mut viewport = Viewport::default();
        viewport.set_zoom(2.5).unwrap();

        let grab = Point::new(300.0, 200.0);
        let world_under_pointer = viewport.screen_to_world(grab);

        viewport.on_pointer_down(grab.x, grab.y);
        assert!(viewport.on_pointer_move(360.0, 150.0));

        let screen = viewport.world_to_screen(world_under_pointer);
        assert!(approx(screen.x, 360.0));
        assert!(approx(screen.y, 150.0));
    }

    #[test]
    fn test_move_without_press_does_nothing() {
        let mut viewport = Viewport::default();
        assert!(!viewport.on_pointer_move(10.0, 10.0));
        assert_eq!(viewport.pan(), PanOffset::default());
    }

    #[test]
    fn test_release_reports_click_or_pan() {
        let mut viewport = Viewport::default();
        viewport.on_pointer_down(100.0, 100.0);
        assert_eq!(
            viewport.on_pointer_up(),
            PointerRelease::Click {
                at: Point::new(100.0, 100.0)
            }
        );

        viewport.on_pointer_down(100.0, 100.0);
        viewport.on_pointer_move(140.0, 100.0);
        assert_eq!(viewport.on_pointer_up(), PointerRelease::Pan);
        assert!(!viewport.drag().is_dragging());
    }

    #[test]
    fn test_leave_ends_drag() {
        let mut viewport = Viewport::default();
        viewport.on_pointer_down(100.0, 100.0);
        viewport.on_pointer_leave();
        assert!(!viewport.on_pointer_move(200.0, 200.0));
        assert_eq!(viewport.on_pointer_up(), PointerRelease::Idle);
    }

    #[test]
    fn test_reset() {
        let mut viewport = Viewport::default();
        viewport.on_wheel(-1.0);
        viewport.set_pan(PanOffset::new(5.0, 5.0));
        viewport.reset();
        assert_eq!(viewport.zoom(), ZoomLevel::default());
        assert_eq!(viewport.pan(), PanOffset::default());
    }

    #[test]
    fn test_set_zoom_rejects_nan() {
        let mut viewport = Viewport::default();
        assert_eq!(
            viewport.set_zoom(f64::NAN).unwrap_err().to_string(),
            "zoom level must be a finite number, got NaN"
        );
    }

    #[test]
    fn test_svg_transform() {
        let transform = Viewport::default().transform();
        assert_eq!(transform.to_svg(), "translate(400, 50) scale(1)");
    }
}
