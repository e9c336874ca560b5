//! Sighting Types - Pure type definitions shared by the server and its tests
//!
//! This crate contains only data types and validation, no async runtime or
//! storage dependencies.

pub mod error;
pub mod sighting;
pub mod timestamp;

pub use error::*;
pub use sighting::*;

use serde::{Deserialize, Serialize};

/// Response body for `GET /api/stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub count: u64,
}

/// Response body for `GET /api/sightings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SightingList {
    pub items: Vec<Sighting>,
}
