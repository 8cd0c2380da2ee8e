use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rewind_history::HistoryConfig;

mod script;
mod workflow;

use script::{parse_script, Replay};

/// Replays a workflow-editor script through a bounded undo/redo history.
#[derive(Parser, Debug)]
#[command(name = "rewind", version, about)]
struct Cli {
    /// JSON-lines script, one editor command per line.
    script: PathBuf,

    /// Maximum number of undo steps kept.
    #[arg(long)]
    capacity: Option<usize>,

    /// History config file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Resolves config: file, then environment, then command line.
fn resolve_config(cli: &Cli) -> Result<HistoryConfig> {
    let mut config = match &cli.config {
        Some(path) => HistoryConfig::load(path)?,
        None => HistoryConfig::default(),
    }
    .with_env_override();

    if let Some(capacity) = cli.capacity {
        config.capacity = capacity;
    }
    config.validate().context("Invalid --capacity")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = resolve_config(&cli)?;
    tracing::info!(capacity = config.capacity, "Starting rewind");

    let text = std::fs::read_to_string(&cli.script)
        .with_context(|| format!("Failed to read script: {}", cli.script.display()))?;
    let commands = parse_script(&text)
        .with_context(|| format!("Failed to parse script: {}", cli.script.display()))?;

    let mut replay = Replay::new(&config)?;
    replay.run(&commands);
    tracing::info!(
        commands = commands.len(),
        can_undo = replay.session().can_undo(),
        can_redo = replay.session().can_redo(),
        "Replay finished"
    );

    let json =
        serde_json::to_string_pretty(replay.working()).context("Failed to serialize workflow")?;
    println!("{json}");
    println!("{}", replay.summary());

    Ok(())
}
