//! Canvas 2D rendering context acquisition

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{Result, UiError};

/// Get 2D rendering context from canvas element
///
/// # Errors
///
/// Returns `UiError::Canvas` if the browser refuses a 2D context or returns
/// something that is not a `CanvasRenderingContext2d`.
pub fn get_2d_context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| UiError::Canvas(format!("Failed to get canvas context: {e:?}")))?
        .ok_or_else(|| UiError::Canvas("Canvas context creation returned None".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| UiError::Canvas("Failed to cast context to CanvasRenderingContext2d".into()))
}
