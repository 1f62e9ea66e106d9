//! Single-node selection and neighbor focus
//!
//! `Selection` is UI-owned mutable state. `Focus` is derived from a selection
//! and the current edge list once per render, and answers opacity and
//! highlight questions for every node and edge.

use std::collections::HashSet;

use crate::geometry::NodeBox;
use crate::models::{Edge, GraphLayout, Point, TaskId};

/// At most one selected task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    selected: Option<TaskId>,
}

impl Selection {
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: None }
    }

    #[must_use]
    pub const fn of(id: TaskId) -> Self {
        Self { selected: Some(id) }
    }

    #[must_use]
    pub const fn selected(&self) -> Option<TaskId> {
        self.selected
    }

    /// Selects `id`, or deselects it if it is already selected
    pub fn toggle(&mut self, id: TaskId) {
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub const fn clear(&mut self) {
        self.selected = None;
    }

    /// Applies a click: a node hit toggles, an empty-canvas hit clears
    pub fn click(&mut self, hit: Option<TaskId>) {
        match hit {
            Some(id) => self.toggle(id),
            None => self.clear(),
        }
    }
}

/// Neighborhood of the selected node
#[derive(Debug, Clone, PartialEq)]
pub struct Focus {
    selected: Option<TaskId>,
    neighbors: HashSet<TaskId>,
    dim_opacity: f64,
}

impl Focus {
    /// Derives focus from a selection
    ///
    /// A selected id that is absent from `layout` yields no focus.
    #[must_use]
    pub fn new(selection: &Selection, layout: &GraphLayout, dim_opacity: f64) -> Self {
        let selected = selection
            .selected()
            .filter(|id| layout.node(*id).is_some());

        let neighbors = selected.map_or_else(HashSet::new, |id| {
            layout
                .edges
                .iter()
                .filter(|edge| edge.touches(id))
                .flat_map(|edge| [edge.source, edge.target])
                .filter(|neighbor| *neighbor != id)
                .collect()
        });

        Self {
            selected,
            neighbors,
            dim_opacity,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.selected.is_some()
    }

    #[must_use]
    pub fn is_selected(&self, id: TaskId) -> bool {
        self.selected == Some(id)
    }

    /// Directly connected to the selected node by any edge
    #[must_use]
    pub fn is_neighbor(&self, id: TaskId) -> bool {
        self.neighbors.contains(&id)
    }

    #[must_use]
    pub fn node_opacity(&self, id: TaskId) -> f64 {
        if !self.is_active() || self.is_selected(id) || self.is_neighbor(id) {
            1.0
        } else {
            self.dim_opacity
        }
    }

    #[must_use]
    pub fn is_edge_highlighted(&self, edge: &Edge) -> bool {
        self.selected.is_some_and(|id| edge.touches(id))
    }

    #[must_use]
    pub fn edge_opacity(&self, edge: &Edge) -> f64 {
        if !self.is_active() || self.is_edge_highlighted(edge) {
            1.0
        } else {
            self.dim_opacity
        }
    }
}

/// Topmost node whose box contains `world`
///
/// Nodes are drawn in layout order, so the last match is on top.
#[must_use]
pub fn hit_test(layout: &GraphLayout, world: Point, node_box: &NodeBox) -> Option<TaskId> {
    layout
        .nodes
        .iter()
        .rev()
        .find(|node| node_box.rect_at(node.position).contains(world))
        .map(|node| node.id())
}
