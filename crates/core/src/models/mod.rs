//! Data models for the dependency graph
//!
//! - `task`: the immutable task snapshot consumed from the collaborator
//! - `graph`: laid-out nodes, resolved edges and the layout container
//! - `colors`: status-to-color mapping shared by every render backend

pub mod colors;
pub mod graph;
pub mod task;

pub use colors::{RgbColor, status_color};
pub use graph::{Edge, GraphLayout, LaidOutNode, Point};
pub use task::{TaskId, TaskNode, TaskStatus, load_tasks, parse_tasks};
