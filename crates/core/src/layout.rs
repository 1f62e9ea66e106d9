//! # Layered layout engine
//!
//! Turns a task snapshot into positioned nodes and resolved edges.
//!
//! Levels come from longest-path leveling over a Kahn-style BFS: a node sits one
//! level below the deepest of its dependencies, so every edge of an acyclic
//! input points strictly downward. Nodes that the BFS never reaches (they sit on
//! a cycle) are placed on level 0. Each level is a row of fixed-width slots
//! centered on `x = 0`.
//!
//! The pass is pure and O(V+E). It never fails: dependency ids missing from the
//! snapshot are dropped and cycles degrade to the level-0 fallback.

use std::collections::{BTreeMap, HashMap, VecDeque};

use itertools::Itertools;
use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::models::{Edge, GraphLayout, LaidOutNode, Point, TaskId, TaskNode};

/// Lays out `tasks` with the default spacing
#[must_use]
pub fn compute_layout(tasks: &[TaskNode]) -> GraphLayout {
    compute_layout_with(tasks, &LayoutConfig::default())
}

/// Lays out `tasks` with custom spacing
///
/// # Examples
///
/// ```
/// use taskdag_core::layout::compute_layout;
/// use taskdag_core::models::{TaskId, TaskNode};
///
/// let tasks = vec![
///     TaskNode::new(1, "Design"),
///     TaskNode::new(2, "Build").with_dependencies([1]),
/// ];
/// let layout = compute_layout(&tasks);
///
/// assert_eq!(layout.level_of(TaskId::new(1)), Some(0));
/// assert_eq!(layout.level_of(TaskId::new(2)), Some(1));
/// assert_eq!(layout.edges.len(), 1);
/// ```
#[must_use]
pub fn compute_layout_with(tasks: &[TaskNode], config: &LayoutConfig) -> GraphLayout {
    let tasks = unique_tasks(tasks);
    let index: HashMap<TaskId, usize> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| (task.id, i))
        .collect();

    let levels = assign_levels(&tasks, &index);
    let positions = place_rows(&levels, config);

    let nodes: Vec<LaidOutNode> = positions
        .iter()
        .filter_map(|&(i, position)| {
            let task = tasks.get(i)?;
            let level = levels.get(i).copied()?;
            Some(LaidOutNode {
                task: (*task).clone(),
                level,
                position,
            })
        })
        .collect();

    let edges = resolve_edges(&nodes);

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        levels = levels.iter().max().map_or(0, |max| max + 1),
        "computed graph layout"
    );

    GraphLayout { nodes, edges }
}

/// Drops later occurrences of a repeated id
fn unique_tasks(tasks: &[TaskNode]) -> Vec<&TaskNode> {
    let unique: Vec<&TaskNode> = tasks.iter().unique_by(|task| task.id).collect();
    if unique.len() < tasks.len() {
        warn!(
            dropped = tasks.len() - unique.len(),
            "duplicate task ids in snapshot, keeping first occurrence"
        );
    }
    unique
}

/// Longest-path level per task, indexed like `tasks`
fn assign_levels(tasks: &[&TaskNode], index: &HashMap<TaskId, usize>) -> Vec<usize> {
    let count = tasks.len();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut in_degree: Vec<usize> = vec![0; count];

    for (target, task) in tasks.iter().enumerate() {
        for dependency in task.dependencies.iter().unique() {
            let Some(&source) = index.get(dependency) else {
                continue;
            };
            if let Some(list) = dependents.get_mut(source) {
                list.push(target);
            }
            if let Some(degree) = in_degree.get_mut(target) {
                *degree += 1;
            }
        }
    }

    let mut levels: Vec<Option<usize>> = vec![None; count];
    let mut queue: VecDeque<usize> = VecDeque::new();
    for (i, degree) in in_degree.iter().enumerate() {
        if *degree == 0 {
            if let Some(level) = levels.get_mut(i) {
                *level = Some(0);
            }
            queue.push_back(i);
        }
    }

    let mut remaining = in_degree;
    let mut visited = 0_usize;
    while let Some(current) = queue.pop_front() {
        visited += 1;
        let next_level = levels.get(current).copied().flatten().unwrap_or(0) + 1;

        for &dependent in dependents.get(current).map_or(&[][..], Vec::as_slice) {
            if let Some(level) = levels.get_mut(dependent) {
                *level = Some(level.map_or(next_level, |existing| existing.max(next_level)));
            }
            if let Some(degree) = remaining.get_mut(dependent) {
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    queue.push_back(dependent);
                }
            }
        }
    }

    if visited < count {
        let unleveled = levels.iter().filter(|level| level.is_none()).count();
        warn!(
            cyclic = count - visited,
            fallback = unleveled,
            "dependency cycle in snapshot, unleveled tasks placed on level 0"
        );
    }

    levels.into_iter().map(|level| level.unwrap_or(0)).collect()
}

/// Centers each level on `x = 0`, returning `(task index, position)` ordered by
/// level then input order
fn place_rows(levels: &[usize], config: &LayoutConfig) -> Vec<(usize, Point)> {
    let mut rows: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &level) in levels.iter().enumerate() {
        rows.entry(level).or_default().push(i);
    }

    rows.into_iter()
        .flat_map(|(level, members)| {
            let slot = config.slot_width;
            let start_x = -(members.len() as f64) * slot / 2.0;
            let y = (level as f64).mul_add(config.level_height, config.top_margin);

            members
                .into_iter()
                .enumerate()
                .map(move |(slot_index, i)| {
                    let x = (slot_index as f64).mul_add(slot, start_x) + slot / 2.0;
                    (i, Point::new(x, y))
                })
        })
        .collect()
}

/// One edge per dependency id that resolves to a laid-out node
fn resolve_edges(nodes: &[LaidOutNode]) -> Vec<Edge> {
    let centers: HashMap<TaskId, Point> = nodes
        .iter()
        .map(|node| (node.id(), node.position))
        .collect();

    let mut dropped = 0_usize;
    let edges: Vec<Edge> = nodes
        .iter()
        .flat_map(|node| {
            node.task
                .dependencies
                .iter()
                .unique()
                .map(move |dependency| (node, *dependency))
        })
        .filter_map(|(node, dependency)| {
            let Some(&from) = centers.get(&dependency) else {
                dropped += 1;
                return None;
            };
            Some(Edge {
                source: dependency,
                target: node.id(),
                from,
                to: node.position,
            })
        })
        .collect();

    if dropped > 0 {
        debug!(dropped, "skipped edges to tasks missing from snapshot");
    }

    edges
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::models::TaskStatus;

    fn task(id: i64, deps: &[i64]) -> TaskNode {
        TaskNode::new(id, format!("Task {id}")).with_dependencies(deps.iter().copied())
    }

    fn level(layout: &GraphLayout, id: i64) -> usize {
        layout.level_of(TaskId::new(id)).expect("node laid out")
    }

    fn position(layout: &GraphLayout, id: i64) -> Point {
        layout.node(TaskId::new(id)).expect("node laid out").position
    }

    #[test]
    fn test_empty_input() {
        let layout = compute_layout(&[]);
        assert!(layout.is_empty());
        assert!(layout.edges.is_empty());
    }

    #[test]
    fn test_diamond_levels() {
        let layout = compute_layout(&[
            task(1, &[]),
            task(2, &[1]),
            task(3, &[1]),
            task(4, &[2, 3]),
        ]);

        assert_eq!(level(&layout, 1), 0);
        assert_eq!(level(&layout, 2), 1);
        assert_eq!(level(&layout, 3), 1);
        assert_eq!(level(&layout, 4), 2);
    }

    #[test]
    fn test_longest_path_not_immediate_parent() {
        // 3 depends on 1 directly and via 2: it must sit below 2
        let layout = compute_layout(&[task(1, &[]), task(2, &[1]), task(3, &[1, 2])]);
        assert_eq!(level(&layout, 3), 2);
    }

    #[test]
    fn test_single_row_is_centered() {
        let layout = compute_layout(&[task(1, &[]), task(2, &[])]);
        assert_eq!(position(&layout, 1), Point::new(-80.0, 50.0));
        assert_eq!(position(&layout, 2), Point::new(80.0, 50.0));
    }

    #[test]
    fn test_odd_row_has_node_on_axis() {
        let layout = compute_layout(&[task(1, &[]), task(2, &[]), task(3, &[])]);
        assert_eq!(position(&layout, 1), Point::new(-160.0, 50.0));
        assert_eq!(position(&layout, 2), Point::new(0.0, 50.0));
        assert_eq!(position(&layout, 3), Point::new(160.0, 50.0));
    }

    #[test]
    fn test_vertical_spacing() {
        let layout = compute_layout(&[task(1, &[]), task(2, &[1]), task(3, &[2])]);
        assert!((position(&layout, 3).y - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_custom_spacing() {
        let config = LayoutConfig {
            slot_width: 100.0,
            level_height: 80.0,
            top_margin: 0.0,
        };
        let layout = compute_layout_with(&[task(1, &[]), task(2, &[1])], &config);
        assert_eq!(position(&layout, 1), Point::new(0.0, 0.0));
        assert_eq!(position(&layout, 2), Point::new(0.0, 80.0));
    }

    #[test]
    fn test_output_ordered_by_level_then_input() {
        let layout = compute_layout(&[task(4, &[3]), task(3, &[]), task(5, &[]), task(6, &[3])]);
        let order: Vec<i64> = layout.nodes.iter().map(|n| n.id().get()).collect();
        assert_eq!(order, vec![3, 5, 4, 6]);
    }

    #[test]
    fn test_missing_dependency_is_dropped() {
        let layout = compute_layout(&[task(1, &[]), task(2, &[1, 99])]);
        assert_eq!(layout.nodes.len(), 2);
        assert_eq!(layout.edges.len(), 1);
        assert_eq!(level(&layout, 2), 1);
        assert!(layout.edges.iter().all(|e| e.source != TaskId::new(99)));
    }

    #[test]
    fn test_two_cycle_falls_back_to_level_zero() {
        let layout = compute_layout(&[task(1, &[2]), task(2, &[1])]);
        assert_eq!(layout.nodes.len(), 2);
        assert_eq!(level(&layout, 1), 0);
        assert_eq!(level(&layout, 2), 0);
        assert_eq!(layout.edges.len(), 2);
    }

    #[test]
    fn test_cycle_reachable_from_root_keeps_partial_level() {
        // 2 and 3 form a cycle; 2 also hangs off root 1
        let layout = compute_layout(&[task(1, &[]), task(2, &[1, 3]), task(3, &[2])]);
        assert_eq!(level(&layout, 1), 0);
        assert_eq!(level(&layout, 2), 1);
        assert_eq!(level(&layout, 3), 0);
    }

    #[test]
    fn test_self_dependency() {
        let layout = compute_layout(&[task(1, &[1]), task(2, &[1])]);
        assert_eq!(level(&layout, 1), 0);
        assert_eq!(level(&layout, 2), 0);
        let self_edge = layout
            .edges
            .iter()
            .find(|e| e.source == TaskId::new(1) && e.target == TaskId::new(1));
        assert!(self_edge.is_some());
    }

    #[test]
    fn test_duplicate_ids_keep_first_occurrence() {
        let first = task(1, &[]).with_status(TaskStatus::Completed);
        let second = task(1, &[]).with_status(TaskStatus::Blocked);
        let layout = compute_layout(&[first, task(2, &[1]), second]);

        assert_eq!(layout.nodes.len(), 2);
        let node = layout.node(TaskId::new(1)).unwrap();
        assert_eq!(node.task.status, TaskStatus::Completed);
    }

    #[test]
    fn test_duplicate_dependency_counts_once() {
        let layout = compute_layout(&[task(1, &[]), task(2, &[1, 1])]);
        assert_eq!(level(&layout, 2), 1);
        assert_eq!(layout.edges.len(), 1);
    }

    #[test]
    fn test_edges_carry_node_centers() {
        let layout = compute_layout(&[task(1, &[]), task(2, &[1])]);
        let edge = layout.edges.first().unwrap();
        assert_eq!(edge.from, position(&layout, 1));
        assert_eq!(edge.to, position(&layout, 2));
    }
}
