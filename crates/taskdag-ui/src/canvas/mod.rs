//! Canvas backend for core scenes
//!
//! - `context`: 2D context acquisition
//! - `clear`: background fill before each frame
//! - `draw`: executes a [`taskdag_core::Scene`] on the context

pub mod clear;
pub mod context;
pub mod draw;

pub use clear::{ClearConfig, clear_canvas};
pub use context::get_2d_context;
pub use draw::draw_scene;
