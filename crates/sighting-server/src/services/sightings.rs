//! Sighting ingestion and query service

use crate::storage::SightingStore;
use sighting_types::{
    timestamp, Sighting, SightingInput, SightingList, StatsResponse, ValidationError,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Limit applied when the client does not ask for one
pub const DEFAULT_LIST_LIMIT: i64 = 2000;
pub const MIN_LIST_LIMIT: u32 = 1;
pub const MAX_LIST_LIMIT: u32 = 5000;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Clamp a client-requested limit into `[MIN_LIST_LIMIT, MAX_LIST_LIMIT]`.
pub fn effective_limit(requested: Option<i64>) -> u32 {
    let clamped = requested
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(i64::from(MIN_LIST_LIMIT), i64::from(MAX_LIST_LIMIT));
    // In range after the clamp
    clamped as u32
}

pub struct SightingService {
    store: Arc<dyn SightingStore>,
}

impl SightingService {
    pub fn new(store: Arc<dyn SightingStore>) -> Self {
        Self { store }
    }

    pub async fn stats(&self) -> Result<StatsResponse, ServiceError> {
        let count = self.store.count().await?;
        debug!("Sighting count: {}", count);
        Ok(StatsResponse { count })
    }

    pub async fn list_recent(&self, requested: Option<i64>) -> Result<SightingList, ServiceError> {
        let limit = effective_limit(requested);
        let items = self.store.list_recent(limit).await?;
        debug!(
            "Listed {} sightings (requested={:?}, limit={})",
            items.len(),
            requested,
            limit
        );
        Ok(SightingList { items })
    }

    /// Validate and persist a new sighting, returning the stored record.
    pub async fn create(&self, input: SightingInput) -> Result<Sighting, ServiceError> {
        let fields = input.validate().inspect_err(|e| debug!("Rejected sighting: {}", e))?;

        let id = uuid::Uuid::new_v4().to_string();
        let sighting = Sighting::new(id, timestamp::now(), fields);

        self.store.insert(&sighting).await?;

        info!(
            "Created sighting: id={}, lat={}, lon={}, accuracy_m={:?}",
            sighting.id, sighting.lat, sighting.lon, sighting.accuracy_m
        );

        Ok(sighting)
    }
}
