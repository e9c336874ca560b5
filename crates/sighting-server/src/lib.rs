//! Sighting Server
//!
//! Records geolocated sightings submitted by clients and serves them back as
//! a newest-first list and an aggregate count. Backed by an embedded SQLite
//! file.

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::ServerConfig;
use services::SightingService;
use storage::{Database, MemoryStore, SightingStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sightings: Arc<SightingService>,
}

impl AppState {
    pub fn new(store: Arc<dyn SightingStore>) -> Self {
        Self {
            sightings: Arc::new(SightingService::new(store)),
        }
    }
}

/// Open the configured store, creating the database schema when needed.
pub async fn open_store(config: &ServerConfig) -> Result<Arc<dyn SightingStore>> {
    if config.ephemeral {
        info!("Using in-memory store, sightings will not be persisted");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let path = config.database_path();
    let db = Database::new(&path)
        .await
        .with_context(|| format!("Failed to initialize database at {}", path.display()))?;
    Ok(Arc::new(db))
}

pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes());

    if let Some(dir) = static_dir {
        info!("Serving page from: {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::stats::get))
        .route(
            "/sightings",
            get(handlers::sightings::list).post(handlers::sightings::create),
        )
}
