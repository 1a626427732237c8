mod app;
mod charts;
mod data;
mod error;
mod events;
mod figure;
mod metrics;
mod money;
mod page;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::{App, ViewMode};

#[derive(Parser, Debug)]
#[command(name = "findash")]
#[command(about = "A TUI dashboard for monthly revenue, cash balance and inventory", long_about = None)]
struct Args {
    /// Input poll interval in milliseconds
    #[arg(long, default_value = "250")]
    tick_rate: u64,

    /// Start with the raw data tables visible
    #[arg(long)]
    show_raw: bool,

    /// Initial view
    #[arg(long, value_enum, default_value_t = ViewMode::Dashboard)]
    view: ViewMode,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// The terminal belongs to the UI, so logs only go to a file
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("findash=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    info!(view = args.view.name(), show_raw = args.show_raw, "starting dashboard");

    let app = App::new(args.view, args.show_raw);

    // Initialize terminal
    let terminal = ratatui::init();

    let result = app.run(terminal, Duration::from_millis(args.tick_rate)).await;

    // Restore terminal
    ratatui::restore();

    result
}
