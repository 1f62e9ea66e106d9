//! Laid-out graph types
//!
//! Everything here is produced fresh by every layout pass and never mutated in
//! place afterwards.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use super::task::{TaskId, TaskNode};
use crate::geometry::{NodeBox, Rect};

/// Position in 2D world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// A task with its assigned level and world position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaidOutNode {
    pub task: TaskNode,
    pub level: usize,
    pub position: Point,
}

impl LaidOutNode {
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.task.id
    }
}

/// Directed edge: `source` must complete before `target`
///
/// `from`/`to` are the centers of the two laid-out nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: TaskId,
    pub target: TaskId,
    pub from: Point,
    pub to: Point,
}

impl Edge {
    /// True if the edge touches `id` at either end
    #[must_use]
    pub fn touches(&self, id: TaskId) -> bool {
        self.source == id || self.target == id
    }
}

/// Output of one layout pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphLayout {
    pub nodes: Vec<LaidOutNode>,
    pub edges: Vec<Edge>,
}

impl GraphLayout {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a laid-out node by id
    #[must_use]
    pub fn node(&self, id: TaskId) -> Option<&LaidOutNode> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// Level assigned to `id`, if it was laid out
    #[must_use]
    pub fn level_of(&self, id: TaskId) -> Option<usize> {
        self.node(id).map(|node| node.level)
    }

    /// Edges ending at `id`
    pub fn incoming(&self, id: TaskId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |edge| edge.target == id)
    }

    /// Edges starting at `id`
    pub fn outgoing(&self, id: TaskId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |edge| edge.source == id)
    }

    /// Number of distinct levels (0 for an empty layout)
    #[must_use]
    pub fn levels(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| node.level)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// World-space rectangle enclosing every node box
    #[must_use]
    pub fn bounds(&self, node_box: &NodeBox) -> Option<Rect> {
        self.nodes
            .iter()
            .map(|node| node_box.rect_at(node.position))
            .reduce(|acc, rect| acc.union(&rect))
    }
}
