//! # Edge geometry
//!
//! Pure functions that decide where edge lines and arrowheads meet the
//! rectangular node boxes.

use thiserror::Error;

use crate::models::Point;

/// Error types for geometry calculations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("direction vector has zero length")]
    ZeroDirectionVector,

    #[error("invalid arrow dimensions: length={length}, width={width}")]
    InvalidDimensions { length: f64, width: f64 },
}

/// Axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    #[must_use]
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// AABB containment, edges inclusive
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Smallest rectangle covering both
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

/// Fixed node rectangle size, expressed as half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    pub half_width: f64,
    pub half_height: f64,
}

impl NodeBox {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.half_width * 2.0
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.half_height * 2.0
    }

    /// Rectangle of a node centered at `center`
    #[must_use]
    pub fn rect_at(&self, center: Point) -> Rect {
        Rect::new(
            Point::new(center.x - self.half_width, center.y - self.half_height),
            Point::new(center.x + self.half_width, center.y + self.half_height),
        )
    }
}

/// Point where the line from `source` to `target` crosses the target's box
///
/// Uses the parametric line / axis-aligned rectangle intersection: the scalar
/// `t = min(half_width/|dx|, half_height/|dy|)` picks whichever side the line
/// reaches first, and the result is `target - t*(dx, dy)`. A zero component
/// counts as an infinite ratio. Coincident centers return `target` unchanged.
///
/// # Examples
///
/// ```
/// use taskdag_core::geometry::intersection;
/// use taskdag_core::models::Point;
///
/// // Straight down: lands on the top edge of the target box
/// let hit = intersection(Point::new(0.0, 0.0), Point::new(0.0, 100.0), 60.0, 20.0);
/// assert_eq!(hit, Point::new(0.0, 80.0));
/// ```
#[must_use]
pub fn intersection(source: Point, target: Point, half_width: f64, half_height: f64) -> Point {
    let dx = target.x - source.x;
    let dy = target.y - source.y;

    if dx == 0.0 && dy == 0.0 {
        return target;
    }

    let tx = if dx == 0.0 {
        f64::INFINITY
    } else {
        half_width / dx.abs()
    };
    let ty = if dy == 0.0 {
        f64::INFINITY
    } else {
        half_height / dy.abs()
    };
    let t = tx.min(ty);

    Point::new(target.x - t * dx, target.y - t * dy)
}

/// [`intersection`] against a configured node box
#[must_use]
pub fn boundary_point(source: Point, target: Point, node_box: &NodeBox) -> Point {
    intersection(source, target, node_box.half_width, node_box.half_height)
}

/// Visible segment of an edge between two node centers
///
/// Starts where the line leaves the source box and ends where it enters the
/// target box, so arrowheads sit on the target outline.
#[must_use]
pub fn edge_segment(from: Point, to: Point, node_box: &NodeBox) -> (Point, Point) {
    let start = boundary_point(to, from, node_box);
    let end = boundary_point(from, to, node_box);
    (start, end)
}

/// Arrow head geometry as three triangle vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    /// Tip of the arrow (on the target outline)
    pub tip: Point,
    pub wing1: Point,
    pub wing2: Point,
}

impl ArrowHead {
    #[must_use]
    pub const fn points(&self) -> [Point; 3] {
        [self.tip, self.wing1, self.wing2]
    }
}

/// Calculates arrow head triangle vertices
///
/// `direction` points toward the tip and does not need to be normalized.
///
/// # Errors
///
/// Returns `GeometryError::ZeroDirectionVector` for a zero-length direction and
/// `GeometryError::InvalidDimensions` for non-positive or non-finite sizes.
pub fn arrow_head(
    tip: Point,
    direction: Point,
    length: f64,
    width: f64,
) -> Result<ArrowHead, GeometryError> {
    if !length.is_finite() || !width.is_finite() || length <= 0.0 || width <= 0.0 {
        return Err(GeometryError::InvalidDimensions { length, width });
    }

    let magnitude = direction.x.hypot(direction.y);
    if magnitude < f64::EPSILON {
        return Err(GeometryError::ZeroDirectionVector);
    }

    let unit = Point::new(direction.x / magnitude, direction.y / magnitude);
    // For vector (dx, dy), perpendicular is (-dy, dx)
    let perpendicular = Point::new(-unit.y, unit.x);

    let base = tip - unit * length;
    let half_width = width / 2.0;

    Ok(ArrowHead {
        tip,
        wing1: base + perpendicular * half_width,
        wing2: base - perpendicular * half_width,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    const EPSILON: f64 = 1e-10;

    fn approx_eq(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
    }

    #[test]
    fn test_coincident_centers_return_target() {
        let p = Point::new(42.0, -7.0);
        assert_eq!(intersection(p, p, 60.0, 20.0), p);
    }

    #[test]
    fn test_vertical_line_hits_top_edge() {
        let hit = intersection(Point::new(0.0, 50.0), Point::new(0.0, 150.0), 60.0, 20.0);
        assert!(approx_eq(hit, Point::new(0.0, 130.0)));
    }

    #[test]
    fn test_horizontal_line_hits_side_edge() {
        let hit = intersection(Point::new(-200.0, 0.0), Point::new(0.0, 0.0), 60.0, 20.0);
        assert!(approx_eq(hit, Point::new(-60.0, 0.0)));
    }

    #[test]
    fn test_shallow_diagonal_hits_side_first() {
        // dx=200, dy=50: tx=0.3, ty=0.4 -> side wins
        let hit = intersection(Point::new(0.0, 0.0), Point::new(200.0, 50.0), 60.0, 20.0);
        assert!(approx_eq(hit, Point::new(140.0, 35.0)));
    }

    #[test]
    fn test_steep_diagonal_hits_top_first() {
        // dx=80, dy=100: tx=0.75, ty=0.2 -> top wins
        let hit = intersection(Point::new(0.0, 0.0), Point::new(80.0, 100.0), 60.0, 20.0);
        assert!(approx_eq(hit, Point::new(64.0, 80.0)));
    }

    #[test]
    fn test_intersection_lies_on_box_outline() {
        let node_box = NodeBox::new(120.0, 40.0);
        let target = Point::new(10.0, 10.0);
        let rect = node_box.rect_at(target);

        for source in [
            Point::new(-300.0, -90.0),
            Point::new(250.0, 400.0),
            Point::new(10.0, -500.0),
            Point::new(900.0, 11.0),
        ] {
            let hit = boundary_point(source, target, &node_box);
            let on_vertical = (hit.x - rect.min.x).abs() < EPSILON
                || (hit.x - rect.max.x).abs() < EPSILON;
            let on_horizontal = (hit.y - rect.min.y).abs() < EPSILON
                || (hit.y - rect.max.y).abs() < EPSILON;
            assert!(on_vertical || on_horizontal, "{hit:?} not on outline");
            assert!(rect.contains(hit));
        }
    }

    #[test]
    fn test_edge_segment_clips_both_ends() {
        let node_box = NodeBox::new(120.0, 40.0);
        let (start, end) = edge_segment(Point::new(0.0, 50.0), Point::new(0.0, 150.0), &node_box);
        assert!(approx_eq(start, Point::new(0.0, 70.0)));
        assert!(approx_eq(end, Point::new(0.0, 130.0)));
    }

    #[test]
    fn test_arrow_pointing_down() {
        let arrow = arrow_head(Point::new(100.0, 100.0), Point::new(0.0, 1.0), 10.0, 7.0).unwrap();
        assert_eq!(arrow.tip, Point::new(100.0, 100.0));
        assert!(approx_eq(arrow.wing1, Point::new(96.5, 90.0)));
        assert!(approx_eq(arrow.wing2, Point::new(103.5, 90.0)));
    }

    #[test]
    fn test_arrow_unnormalized_direction() {
        let arrow = arrow_head(Point::new(100.0, 100.0), Point::new(3.0, 4.0), 10.0, 6.0).unwrap();
        let base = Point::new(
            (arrow.wing1.x + arrow.wing2.x) / 2.0,
            (arrow.wing1.y + arrow.wing2.y) / 2.0,
        );
        assert!(approx_eq(base, Point::new(94.0, 92.0)));
    }

    #[test]
    fn test_arrow_errors() {
        let tip = Point::new(0.0, 0.0);
        assert_eq!(
            arrow_head(tip, Point::origin(), 10.0, 7.0),
            Err(GeometryError::ZeroDirectionVector)
        );
        assert!(arrow_head(tip, Point::new(1.0, 0.0), -1.0, 7.0).is_err());
        assert!(arrow_head(tip, Point::new(1.0, 0.0), 10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_rect_contains_and_union() {
        let a = Rect::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let b = Rect::new(Point::new(5.0, -5.0), Point::new(20.0, 5.0));
        assert!(a.contains(Point::new(10.0, 10.0)));
        assert!(!a.contains(Point::new(10.1, 5.0)));

        let u = a.union(&b);
        assert_eq!(u.min, Point::new(0.0, -5.0));
        assert_eq!(u.max, Point::new(20.0, 10.0));
        assert!((u.width() - 20.0).abs() < EPSILON);
        assert!((u.height() - 15.0).abs() < EPSILON);
    }
}
