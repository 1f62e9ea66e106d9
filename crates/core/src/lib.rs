//! # taskdag core
//!
//! Dependency-graph visualization engine for task snapshots, with no UI
//! toolkit dependency.
//!
//! Data flows one way per recompute:
//!
//! ```text
//! tasks -> layout::compute_layout -> GraphLayout -> render::render_scene -> Scene
//!                                                        ^          ^
//!                                                   Viewport    Selection
//! ```
//!
//! The layout is a pure function of the snapshot. Viewport and selection are
//! separate mutable state owned by the host UI and survive every recompute.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` / `expect()` / `panic!()` outside tests
//! - No `unsafe`
//! - Malformed or cyclic input degrades to a drawable layout, never an error

pub mod config;
pub mod dependency;
mod error;
pub mod geometry;
pub mod layout;
pub mod models;
pub mod render;
pub mod selection;
pub mod viewport;

pub use config::GraphConfig;
pub use error::{Error, Result};
pub use layout::{compute_layout, compute_layout_with};
pub use models::{Edge, GraphLayout, LaidOutNode, Point, TaskId, TaskNode, TaskStatus};
pub use render::{Scene, render_scene};
pub use selection::{Focus, Selection, hit_test};
pub use viewport::Viewport;
