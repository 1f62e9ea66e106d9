//! Property-based tests for the layout engine, geometry and viewport.
//!
//! Uses proptest to validate:
//! - Termination with one laid-out node per input, even for cyclic input
//! - Strict level increase along every edge of an acyclic input
//! - Idempotence of repeated layout passes
//! - Edges only ever reference laid-out nodes
//! - Zoom stays clamped under arbitrary wheel sequences

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::collections::HashSet;

use proptest::prelude::*;
use taskdag_core::geometry::{NodeBox, intersection};
use taskdag_core::viewport::{MAX_ZOOM, MIN_ZOOM, Viewport};
use taskdag_core::{Point, TaskId, TaskNode, compute_layout};

const EPSILON: f64 = 1e-6;

/// Unique ids `0..n`, dependencies drawn from `0..30` so some are missing and
/// cycles are common
fn arbitrary_tasks() -> impl Strategy<Value = Vec<TaskNode>> {
    prop::collection::vec(prop::collection::vec(0i64..30, 0..4), 0..25).prop_map(|rows| {
        (0i64..)
            .zip(rows)
            .map(|(id, deps)| TaskNode::new(id, format!("Task {id}")).with_dependencies(deps))
            .collect()
    })
}

/// Every task depends only on lower ids; input order is shuffled
fn acyclic_tasks() -> impl Strategy<Value = Vec<TaskNode>> {
    prop::collection::vec(prop::collection::vec(any::<u16>(), 0..4), 0..25)
        .prop_map(|rows| {
            (0i64..)
                .zip(rows)
                .map(|(id, picks)| {
                    let deps: Vec<i64> = if id == 0 {
                        Vec::new()
                    } else {
                        picks.into_iter().map(|p| i64::from(p) % id).collect()
                    };
                    TaskNode::new(id, format!("Task {id}")).with_dependencies(deps)
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn wheel_delta() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1000.0f64..1000.0,
        Just(0.0),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

proptest! {
    /// Property: layout terminates with exactly one node per input task
    #[test]
    fn prop_one_node_per_task(tasks in arbitrary_tasks()) {
        let layout = compute_layout(&tasks);

        prop_assert_eq!(layout.nodes.len(), tasks.len());
        let input: HashSet<TaskId> = tasks.iter().map(|t| t.id).collect();
        let output: HashSet<TaskId> = layout.nodes.iter().map(|n| n.id()).collect();
        prop_assert_eq!(input, output);
    }

    /// Property: every edge of an acyclic input points strictly downward
    #[test]
    fn prop_acyclic_levels_strictly_increase(tasks in acyclic_tasks()) {
        let layout = compute_layout(&tasks);

        for edge in &layout.edges {
            let source = layout.level_of(edge.source);
            let target = layout.level_of(edge.target);
            prop_assert!(source.is_some() && target.is_some());
            prop_assert!(target > source, "edge {} -> {} not downward", edge.source, edge.target);
            prop_assert!(edge.to.y > edge.from.y);
        }
    }

    /// Property: re-running the layout on the same input is identical
    #[test]
    fn prop_layout_is_idempotent(tasks in arbitrary_tasks()) {
        prop_assert_eq!(compute_layout(&tasks), compute_layout(&tasks));
    }

    /// Property: edges exist exactly for dependencies that resolve
    #[test]
    fn prop_edges_reference_laid_out_nodes(tasks in arbitrary_tasks()) {
        let layout = compute_layout(&tasks);
        let ids: HashSet<TaskId> = tasks.iter().map(|t| t.id).collect();

        for edge in &layout.edges {
            prop_assert!(ids.contains(&edge.source));
            prop_assert!(ids.contains(&edge.target));
        }

        let expected: usize = tasks
            .iter()
            .map(|t| {
                t.dependencies
                    .iter()
                    .filter(|d| ids.contains(d))
                    .collect::<HashSet<_>>()
                    .len()
            })
            .sum();
        prop_assert_eq!(layout.edges.len(), expected);
    }

    /// Property: rows are centered on the vertical axis
    #[test]
    fn prop_rows_are_centered(tasks in arbitrary_tasks()) {
        let layout = compute_layout(&tasks);

        for level in 0..layout.levels() {
            let xs: Vec<f64> = layout
                .nodes
                .iter()
                .filter(|n| n.level == level)
                .map(|n| n.position.x)
                .collect();
            let sum: f64 = xs.iter().sum();
            prop_assert!(sum.abs() < EPSILON);
        }
    }

    /// Property: zoom stays within bounds after any wheel sequence
    #[test]
    fn prop_zoom_always_clamped(deltas in prop::collection::vec(wheel_delta(), 0..200)) {
        let mut viewport = Viewport::default();
        for delta in deltas {
            viewport.on_wheel(delta);
            let zoom = viewport.zoom().value();
            prop_assert!((MIN_ZOOM..=MAX_ZOOM).contains(&zoom));
        }
    }

    /// Property: the intersection point lies on the target box outline
    #[test]
    fn prop_intersection_on_outline(
        sx in -1000.0f64..1000.0,
        sy in -1000.0f64..1000.0,
        tx in -1000.0f64..1000.0,
        ty in -1000.0f64..1000.0,
    ) {
        let node_box = NodeBox::new(120.0, 40.0);
        let source = Point::new(sx, sy);
        let target = Point::new(tx, ty);
        let hit = intersection(source, target, node_box.half_width, node_box.half_height);

        if source == target {
            prop_assert_eq!(hit, target);
        } else {
            let dx = (hit.x - tx).abs();
            let dy = (hit.y - ty).abs();
            prop_assert!(dx <= node_box.half_width + EPSILON);
            prop_assert!(dy <= node_box.half_height + EPSILON);
            prop_assert!(
                (dx - node_box.half_width).abs() < EPSILON
                    || (dy - node_box.half_height).abs() < EPSILON
            );
        }
    }

    /// Property: a drag keeps the grabbed world point under the pointer
    #[test]
    fn prop_pan_tracks_pointer(
        notches in -30i32..30,
        px in 0.0f64..800.0,
        py in 0.0f64..400.0,
        qx in 0.0f64..800.0,
        qy in 0.0f64..400.0,
    ) {
        let mut viewport = Viewport::default();
        for _ in 0..notches.unsigned_abs() {
            viewport.on_wheel(f64::from(notches.signum()));
        }

        let grabbed = viewport.screen_to_world(Point::new(px, py));
        viewport.on_pointer_down(px, py);
        viewport.on_pointer_move(qx, qy);

        let screen = viewport.world_to_screen(grabbed);
        prop_assert!((screen.x - qx).abs() < EPSILON);
        prop_assert!((screen.y - qy).abs() < EPSILON);
    }
}
