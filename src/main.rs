//! # taskdag
//!
//! Command-line front end for the taskdag core: reads a task snapshot, lays it
//! out in levels and prints JSON or SVG.
//!
//! ## Startup
//!
//! 1. **Tracing** - `RUST_LOG` if set, otherwise `info` (`debug` with `-v`)
//! 2. **Configuration** - `--config` TOML file, validated, or built-in defaults
//! 3. **Command** - dispatched to `commands::execute_command`

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use taskdag_core::GraphConfig;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => GraphConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GraphConfig::default(),
    };
    debug!(?config, "configuration ready");

    commands::execute_command(cli.command, &config)
}

/// Initialize tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays machine readable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
