//! Zoom level bounds validation
//!
//! `ZoomLevel` keeps every zoom value finite and inside the configured range.
//! Out-of-range values are clamped, non-finite values are rejected.

use super::ViewportError;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;

/// A validated zoom factor
///
/// # Examples
///
/// ```
/// use taskdag_core::viewport::ZoomLevel;
///
/// let zoom = ZoomLevel::new(10.0)?;
/// assert!((zoom.value() - 5.0).abs() < f64::EPSILON);
///
/// assert!(ZoomLevel::new(f64::NAN).is_err());
/// # Ok::<(), taskdag_core::viewport::ViewportError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLevel {
    value: f64,
}

impl ZoomLevel {
    /// Creates a zoom level clamped to `[MIN_ZOOM, MAX_ZOOM]`
    ///
    /// # Errors
    ///
    /// Returns `ViewportError::NonFiniteZoom` for NaN or infinite input.
    pub fn new(value: f64) -> Result<Self, ViewportError> {
        Self::within(value, MIN_ZOOM, MAX_ZOOM)
    }

    /// Creates a zoom level clamped to `[min, max]`
    ///
    /// # Errors
    ///
    /// Returns `ViewportError::NonFiniteZoom` for NaN or infinite input.
    pub fn within(value: f64, min: f64, max: f64) -> Result<Self, ViewportError> {
        if !value.is_finite() {
            return Err(ViewportError::NonFiniteZoom(value));
        }
        Ok(Self {
            value: value.max(min).min(max),
        })
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Multiplies by `factor`, clamping to `[min, max]`
    ///
    /// A non-finite product leaves the level unchanged.
    #[must_use]
    pub fn scaled(self, factor: f64, min: f64, max: f64) -> Self {
        Self::within(self.value * factor, min, max).unwrap_or(self)
    }

    /// Rounded percentage, e.g. `121` for 1.21
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn percent(&self) -> i64 {
        (self.value * 100.0).round() as i64
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self { value: 1.0 }
    }
}
