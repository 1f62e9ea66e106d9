//! CLI command definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// taskdag - layered dependency graphs for task snapshots
#[derive(Parser, Debug)]
#[command(name = "taskdag")]
#[command(version)]
#[command(about = "Lay out and render task dependency graphs")]
#[command(
    long_about = "taskdag reads a task snapshot (the JSON array returned by the task service), assigns each task a level by longest dependency path and renders the resulting graph as SVG."
)]
pub struct Cli {
    /// TOML file overriding layout, viewport and render settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print levels and positions as JSON
    Layout {
        /// Task snapshot (JSON array)
        tasks: PathBuf,
    },

    /// Render the graph as SVG
    Render {
        /// Task snapshot (JSON array)
        tasks: PathBuf,

        /// Task id to select (highlights its neighborhood)
        #[arg(short, long)]
        selected: Option<i64>,

        /// Zoom factor, clamped to the configured bounds
        #[arg(short, long)]
        zoom: Option<f64>,

        /// Surface width in pixels
        #[arg(long, default_value_t = 800.0)]
        width: f64,

        /// Surface height in pixels
        #[arg(long, default_value_t = 400.0)]
        height: f64,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the user-facing message for a rejected dependency payload
    CycleMessage {
        /// Payload such as '{"error": "Circular dependency detected.", "path": [1, 4, 1]}'
        payload: String,
    },
}
