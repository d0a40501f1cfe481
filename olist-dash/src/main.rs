//! olist-dash - Sales dashboard over the Olist e-commerce dataset
//!
//! Loads the six source tables once at startup (any failure stops the
//! process before the port is bound), then serves the dashboard page and
//! its JSON API.

use anyhow::{Context, Result};
use clap::Parser;
use olist_common::config::{resolve_config, ConfigOverrides};
use olist_common::DatasetCache;
use olist_dash::{build_router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Command-line arguments (highest configuration priority)
#[derive(Debug, Parser)]
#[command(name = "olist-dash", version, about = "Olist e-commerce sales dashboard")]
struct Args {
    /// Directory holding the six olist_*_dataset.csv files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Listen address
    #[arg(long)]
    host: Option<String>,

    /// Listen port
    #[arg(long)]
    port: Option<u16>,

    /// Config file (defaults to <config dir>/olist-dash/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting Olist sales dashboard (olist-dash) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = resolve_config(&ConfigOverrides {
        data_dir: args.data_dir,
        host: args.host,
        port: args.port,
        config_file: args.config,
    });
    info!("Data directory: {}", config.data_dir.display());

    let cache = Arc::new(DatasetCache::new(&config.data_dir));
    if let Err(e) = cache.get_or_load() {
        error!("Failed to load data: {}", e);
        return Err(e).context("dataset load failed, not starting server");
    }

    let app = build_router(AppState::new(cache));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!("olist-dash listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
