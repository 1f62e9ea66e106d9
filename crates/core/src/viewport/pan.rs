//! Pan offset and drag tracking
//!
//! A drag records where inside the view the pointer grabbed it. While the
//! button stays down the pan follows `pointer - grab_offset`, so the grabbed
//! world point stays under the pointer at any zoom.

use crate::models::Point;

/// Screen-space pan offset in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanOffset {
    x: f64,
    y: f64,
}

impl PanOffset {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub const fn as_point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Drag state for pan gestures
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Pointer position minus pan at press time
        grab_offset: Point,
        /// Pointer position at press time
        press: Point,
        /// Pointer has left the click slop radius
        moved: bool,
    },
}

impl DragState {
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// How a press/release gesture ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerRelease {
    /// Released without a preceding press
    Idle,
    /// Pointer stayed within the click slop; `at` is the screen press point
    Click { at: Point },
    /// Pointer moved the view
    Pan,
}

#[must_use]
pub fn start_drag(pan: PanOffset, pointer: Point) -> DragState {
    DragState::Dragging {
        grab_offset: pointer - pan.as_point(),
        press: pointer,
        moved: false,
    }
}

/// Pan offset for the pointer position during a drag
///
/// Returns the new offset and drag state, or `None` when not dragging.
#[must_use]
pub fn update_drag(
    state: DragState,
    pointer: Point,
    click_slop: f64,
) -> Option<(PanOffset, DragState)> {
    match state {
        DragState::Idle => None,
        DragState::Dragging {
            grab_offset,
            press,
            moved,
        } => {
            let pan = pointer - grab_offset;
            let moved = moved || press.distance(pointer) > click_slop;
            Some((
                PanOffset::new(pan.x, pan.y),
                DragState::Dragging {
                    grab_offset,
                    press,
                    moved,
                },
            ))
        }
    }
}

#[must_use]
pub const fn end_drag(state: DragState) -> PointerRelease {
    match state {
        DragState::Idle => PointerRelease::Idle,
        DragState::Dragging { moved: true, .. } => PointerRelease::Pan,
        DragState::Dragging { press, .. } => PointerRelease::Click { at: press },
    }
}
