//! CLI command handlers.
//!
//! Each handler builds its output as a `String` so it can be tested without
//! touching stdout; `execute_command` does the printing.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use taskdag_core::config::GraphConfig;
use taskdag_core::dependency::DependencyRejection;
use taskdag_core::models::load_tasks;
use taskdag_core::render::svg::to_svg;
use taskdag_core::{
    GraphLayout, Selection, TaskId, TaskNode, Viewport, compute_layout_with, render_scene,
};

use crate::cli::Commands;

#[derive(Debug, Serialize)]
struct NodeRow<'a> {
    id: TaskId,
    title: &'a str,
    status: &'static str,
    level: usize,
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize)]
struct EdgeRow {
    source: TaskId,
    target: TaskId,
}

#[derive(Debug, Serialize)]
struct LayoutReport<'a> {
    nodes: Vec<NodeRow<'a>>,
    edges: Vec<EdgeRow>,
}

/// Execute a CLI command.
pub fn execute_command(command: Commands, config: &GraphConfig) -> Result<()> {
    match command {
        Commands::Layout { tasks } => {
            let tasks = read_tasks(&tasks)?;
            println!("{}", layout_json(&tasks, config)?);
            Ok(())
        }

        Commands::Render {
            tasks,
            selected,
            zoom,
            width,
            height,
            output,
        } => {
            let tasks = read_tasks(&tasks)?;
            let svg = render_svg(&tasks, config, selected, zoom, width, height)?;
            match output {
                Some(path) => {
                    fs::write(&path, svg)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "wrote SVG");
                }
                None => print!("{svg}"),
            }
            Ok(())
        }

        Commands::CycleMessage { payload } => {
            println!("{}", cycle_message(&payload)?);
            Ok(())
        }
    }
}

fn read_tasks(path: &Path) -> Result<Vec<TaskNode>> {
    let tasks = load_tasks(path)
        .with_context(|| format!("Failed to load task snapshot {}", path.display()))?;
    info!(count = tasks.len(), "loaded task snapshot");
    Ok(tasks)
}

/// Layout as pretty JSON: node levels and positions plus resolved edges
pub fn layout_json(tasks: &[TaskNode], config: &GraphConfig) -> Result<String> {
    let layout = compute_layout_with(tasks, &config.layout);
    serde_json::to_string_pretty(&report(&layout)).context("Failed to serialize layout")
}

fn report(layout: &GraphLayout) -> LayoutReport<'_> {
    LayoutReport {
        nodes: layout
            .nodes
            .iter()
            .map(|node| NodeRow {
                id: node.id(),
                title: &node.task.title,
                status: node.task.status.as_str(),
                level: node.level,
                x: node.position.x,
                y: node.position.y,
            })
            .collect(),
        edges: layout
            .edges
            .iter()
            .map(|edge| EdgeRow {
                source: edge.source,
                target: edge.target,
            })
            .collect(),
    }
}

/// Full pipeline: layout, viewport, selection, scene, SVG
pub fn render_svg(
    tasks: &[TaskNode],
    config: &GraphConfig,
    selected: Option<i64>,
    zoom: Option<f64>,
    width: f64,
    height: f64,
) -> Result<String> {
    let layout = compute_layout_with(tasks, &config.layout);

    let mut viewport = Viewport::new(config.viewport);
    if let Some(zoom) = zoom {
        viewport.set_zoom(zoom).context("Invalid --zoom")?;
    }

    let selection = selected.map_or_else(Selection::new, |id| Selection::of(TaskId::new(id)));
    let scene = render_scene(&layout, &viewport, &selection, &config.render);
    Ok(to_svg(&scene, width, height))
}

/// User-facing message for a collaborator rejection payload
pub fn cycle_message(payload: &str) -> Result<String> {
    let rejection: DependencyRejection =
        serde_json::from_str(payload).context("Payload is not a dependency rejection")?;
    Ok(rejection.message())
}
