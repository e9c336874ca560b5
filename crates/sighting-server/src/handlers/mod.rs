//! HTTP handlers

pub mod health;
pub mod sightings;
pub mod stats;

pub use health::health;
