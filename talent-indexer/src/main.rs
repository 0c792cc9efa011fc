//! Talent Marketplace Indexer
//!
//! Replays a recorded marketplace event stream into RocksDB, resolving
//! description content from a local directory of pinned files.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use talent_indexer::adapters::content::LocalContentSource;
use talent_indexer::adapters::storage::RocksDBClient;
use talent_indexer::core::EntityStore;
use talent_indexer::services::run_replay;
use talent_indexer::IndexerConfig;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "talent-indexer")]
#[command(about = "Talent marketplace event indexer")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "indexer.toml")]
    config: PathBuf,

    /// JSON-lines file of decoded events, in log order
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// Override log level
    #[arg(long)]
    log_level: Option<String>,

    /// Dry run mode (validate config and exit)
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = IndexerConfig::load(&cli.config)?;

    // Override log level if provided
    if let Some(log_level) = cli.log_level {
        config.monitoring.log_level = log_level;
    }

    // Initialize logging
    init_logging(&config);

    info!("Starting talent marketplace indexer");
    info!("RocksDB path: {:?}", config.storage.path);
    info!("Content directory: {:?}", config.content.directory);
    info!(
        "Description retention: {:?}",
        config.indexer.description_retention
    );

    config.ensure_directories()?;
    info!("Configuration validated successfully");

    if cli.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        return Ok(());
    }

    let Some(events) = cli.events else {
        anyhow::bail!("No events file given (use --events)");
    };

    let store = Arc::new(RocksDBClient::open(&config.storage)?);
    store.health_check()?;
    let source = Arc::new(LocalContentSource::new(config.content.directory.clone()));

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
        result = run_replay(store, source, &events, config.indexer.description_retention) => {
            match result {
                Ok(summary) => info!(
                    "Indexed {} events, {} descriptions delivered",
                    summary.events, summary.content.delivered
                ),
                Err(e) => {
                    error!("Indexing stopped: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    info!("Shutting down talent marketplace indexer");
    Ok(())
}

fn init_logging(config: &IndexerConfig) {
    let log_level = config
        .monitoring
        .log_level
        .parse()
        .unwrap_or(tracing::Level::INFO);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("talent_indexer={}", log_level).into());

    if config.monitoring.structured_logging {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
