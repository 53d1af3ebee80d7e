//! Headless step runner
//!
//! Drives the simulation server against an in-memory scene and prints each
//! step summary. Useful for checking a server without a window.
//!
//! Examples:
//!   cargo run -p rescue-sync --bin step_runner -- --steps 20
//!   cargo run -p rescue-sync --bin step_runner -- --reset --level board.toml

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rescue_sync::{
    AdvanceOutcome, ClientConfig, HttpSimServer, LevelLayout, MemoryScene, Prefab,
    SceneDiffApplier, StepDriver,
};
use tracing_subscriber::EnvFilter;

/// Headless step runner
#[derive(Parser, Debug)]
#[command(name = "step_runner")]
#[command(about = "Poll the rescue simulation and apply steps to an in-memory scene")]
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

    /// Number of steps to fetch
    #[arg(long, default_value_t = 10)]
    steps: u64,

    /// Reset the simulation before stepping
    #[arg(long)]
    reset: bool,

    /// Delay between steps in milliseconds
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
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

    let server = HttpSimServer::new(&config.server).context("failed to build HTTP client")?;
    let mut scene = MemoryScene::new();
    let mut applier = SceneDiffApplier::from_config(&config);
    let mut driver = StepDriver::new();

    if let Some(path) = &args.level {
        let level = LevelLayout::from_file(path)
            .with_context(|| format!("failed to load level {}", path.display()))?;
        level.populate(&mut scene, &mut applier);
    }

    println!("Rescue step runner");
    println!("=================");
    println!("Step URL: {}", server.step_url());
    println!("Reset URL: {}", server.reset_url());
    println!();

    if args.reset {
        let (_, advance) = driver.reset(&server, &mut applier, &mut scene).await;
        if let Some(AdvanceOutcome::Rendered(summary)) = advance {
            println!("{}\n", summary);
        }
    }

    let mut failures = 0;
    for _ in 0..args.steps {
        match driver.advance(&server, &mut applier, &mut scene).await {
            AdvanceOutcome::Rendered(summary) => println!("{}\n", summary),
            AdvanceOutcome::Failed(_) => failures += 1,
            AdvanceOutcome::Skipped => {}
        }
        if driver.is_finished() {
            println!("Game finished at step {}", driver.step());
            break;
        }
        if args.interval_ms > 0 {
            tokio::time::sleep(Duration::from_millis(args.interval_ms)).await;
        }
    }

    let hidden_walls = scene
        .entities_of(Prefab::Wall)
        .filter(|(_, e)| !e.visible)
        .count();
    println!("Steps rendered: {}", driver.step());
    println!("Failed requests: {}", failures);
    println!("Live entities: {}", scene.len());
    println!("Hidden walls: {}", hidden_walls);

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
