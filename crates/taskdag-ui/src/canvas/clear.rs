//! Canvas clearing

use web_sys::CanvasRenderingContext2d;

use crate::error::{Result, UiError};

/// Surface size and background for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearConfig {
    pub width: f64,
    pub height: f64,
    pub background_color: &'static str,
}

impl Default for ClearConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            background_color: "#ffffff",
        }
    }
}

impl ClearConfig {
    #[must_use]
    pub fn with_size(self, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }
}

/// Resets the transform, clears the surface and fills the background
///
/// # Errors
///
/// Returns `UiError::Canvas` if the context refuses the identity transform;
/// nothing is cleared in that case.
pub fn clear_canvas(context: &CanvasRenderingContext2d, config: &ClearConfig) -> Result<()> {
    context
        .set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
        .map_err(|e| UiError::Canvas(format!("Failed to reset transform: {e:?}")))?;
    context.clear_rect(0.0, 0.0, config.width, config.height);
    context.set_fill_style_str(config.background_color);
    context.fill_rect(0.0, 0.0, config.width, config.height);
    Ok(())
}
