//! Business logic services

pub mod sightings;

pub use sightings::{effective_limit, ServiceError, SightingService};
