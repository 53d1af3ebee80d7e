//! Castle Rescue board viewer
//!
//! Run with: cargo run -p viz
//!
//! Examples:
//!   cargo run -p viz -- --level board.toml
//!   cargo run -p viz -- --step-url http://sim:5000/step --auto-advance-ms 500

use anyhow::{Context, Result};
use bevy::prelude::*;
use clap::Parser;
use rescue_sync::{ClientConfig, LevelLayout};
use std::path::PathBuf;
use std::time::Duration;
use viz::settings::{AutoAdvance, ClientSettings, LevelSource};
use viz::RescueVizPlugin;

/// Castle Rescue board viewer
#[derive(Parser, Debug)]
#[command(name = "viz")]
#[command(about = "3D viewer for the fire rescue simulation")]
struct Args {
    /// Client configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Level file listing walls and doors (TOML)
    #[arg(long)]
    level: Option<PathBuf>,

    /// Override the step endpoint
    #[arg(long)]
    step_url: Option<String>,

    /// Override the reset endpoint
    #[arg(long)]
    reset_url: Option<String>,

    /// Request a step automatically at this interval
    #[arg(long)]
    auto_advance_ms: Option<u64>,

    /// Hide agents missing from a step instead of leaving them in place
    #[arg(long)]
    hide_absent_agents: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(url) = args.step_url {
        config.server.step_url = url;
    }
    if let Some(url) = args.reset_url {
        config.server.reset_url = url;
    }
    if args.hide_absent_agents {
        config.agents.hide_absent = true;
    }

    let level = match &args.level {
        Some(path) => LevelSource {
            layout: LevelLayout::from_file(path)
                .with_context(|| format!("failed to load level {}", path.display()))?,
        },
        None => LevelSource::default(),
    };

    let auto_advance = match args.auto_advance_ms {
        Some(ms) if ms > 0 => AutoAdvance::every(Duration::from_millis(ms)),
        _ => AutoAdvance::default(),
    };

    App::new()
        .insert_resource(ClientSettings { config })
        .insert_resource(level)
        .insert_resource(auto_advance)
        .add_plugins(RescueVizPlugin)
        .run();

    Ok(())
}
