//! Aggregate statistics handler

use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, Json};
use sighting_types::StatsResponse;

pub async fn get(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.sightings.stats().await?;
    Ok(Json(stats))
}
