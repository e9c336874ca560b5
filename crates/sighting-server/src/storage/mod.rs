//! Storage layer
//!
//! SQLite (embedded) for durable storage, DashMap (in-memory) for ephemeral
//! runs and tests. Both order listings newest first, breaking timestamp ties
//! by later insertion first.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryStore;

use anyhow::Result;
use async_trait::async_trait;
use sighting_types::Sighting;

#[async_trait]
pub trait SightingStore: Send + Sync {
    /// Number of persisted sightings
    async fn count(&self) -> Result<u64>;

    /// Persist one sighting as a single atomic write
    async fn insert(&self, sighting: &Sighting) -> Result<()>;

    /// Up to `limit` sightings, most recent first
    async fn list_recent(&self, limit: u32) -> Result<Vec<Sighting>>;
}
