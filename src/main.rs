//! MoodPulse API Server
//!
//! Run with: cargo run --bin moodpulse [-- --config path/to/config.toml]
//!
//! # Configuration
//!
//! Without `--config`, the config is searched in the user config dir,
//! `/etc/moodpulse/config.toml` and `./config.toml`, falling back to
//! defaults. Environment variables override file settings:
//! - `MOODPULSE_DATABASE`: SQLite database path
//! - `MOODPULSE_HOST` / `MOODPULSE_PORT`: bind address (default: 127.0.0.1:5000)
//! - `MOODPULSE_LOG_LEVEL` / `MOODPULSE_LOG_FORMAT`: logging
//! - `RUST_LOG`: full tracing filter, wins over the configured level

use anyhow::Context;
use clap::Parser;
use moodpulse::api::{serve, AppState};
use moodpulse::config::Config;
use moodpulse::service::MoodService;
use moodpulse::storage::SqliteStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "moodpulse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MoodPulse check-in and analysis server")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    moodpulse::logging::init(&config.logging);

    tracing::info!("Starting MoodPulse server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Database: {}", config.storage.database_path);
    tracing::info!(
        moods = config.vocabulary.moods().len(),
        context_tags = config.vocabulary.context_tags().len(),
        "Vocabulary loaded"
    );

    let store = Arc::new(
        SqliteStore::open(&config.storage.database_path)
            .with_context(|| format!("opening database {}", config.storage.database_path))?,
    );

    let service = Arc::new(MoodService::new(
        store,
        Arc::new(config.vocabulary.clone()),
        config.analysis.clone(),
    ));

    let state = AppState::new(service, config.api.clone());
    serve(state, &config.api).await?;

    tracing::info!("MoodPulse server stopped");
    Ok(())
}
