//! In-memory sighting store using DashMap (nothing survives a restart)

use super::SightingStore;
use anyhow::{bail, Result};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sighting_types::Sighting;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct MemoryStore {
    data: DashMap<String, StoredSighting>,
    next_seq: AtomicU64,
}

struct StoredSighting {
    seq: u64,
    sighting: Sighting,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SightingStore for MemoryStore {
    async fn count(&self) -> Result<u64> {
        Ok(self.data.len() as u64)
    }

    async fn insert(&self, sighting: &Sighting) -> Result<()> {
        match self.data.entry(sighting.id.clone()) {
            Entry::Occupied(_) => bail!("Sighting {} already exists", sighting.id),
            Entry::Vacant(slot) => {
                slot.insert(StoredSighting {
                    seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
                    sighting: sighting.clone(),
                });
            }
        }
        Ok(())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Sighting>> {
        let mut entries: Vec<(u64, Sighting)> = self
            .data
            .iter()
            .map(|entry| (entry.seq, entry.sighting.clone()))
            .collect();

        entries.sort_by(|(a_seq, a), (b_seq, b)| {
            b.created_at_utc
                .cmp(&a.created_at_utc)
                .then(b_seq.cmp(a_seq))
        });

        Ok(entries
            .into_iter()
            .take(limit as usize)
            .map(|(_, sighting)| sighting)
            .collect())
    }
}
