//! Sighting Server binary
//!
//! Uses SQLite (embedded) for storage; the database location comes from
//! `DATA_DIR` / `DATABASE_PATH`.

use anyhow::{Context, Result};
use clap::Parser;
use sighting_server::{build_router, open_store, AppState, ServerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    if let Err(e) = init_tracing(config.verbose) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    // Panics go through tracing, then the default hook
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!("{}", info);
        default_hook(info);
    }));

    info!("Starting Sighting Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server(config).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "sighting_server=debug,tower_http=debug"
    } else {
        "sighting_server=info,tower_http=info"
    };

    // RUST_LOG takes precedence
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run_server(config: ServerConfig) -> Result<()> {
    info!(
        "Config loaded: bind={}, db={}, ephemeral={}",
        config.bind_address,
        config.database_path().display(),
        config.ephemeral
    );

    // Storage must be ready before any traffic is accepted
    let store = open_store(&config).await?;
    let state = AppState::new(store);

    let app = build_router(state, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", config.bind_address);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
