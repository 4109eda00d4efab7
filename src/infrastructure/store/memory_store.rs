//! In-process store backed by a concurrent hash map.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::domain::{Mapping, MappingStore, PutOutcome, StoreError};

/// Thread-safe in-memory store mapping slug -> [`Mapping`].
///
/// Per-key atomicity comes from the `DashMap` shard locks, so concurrent
/// `put` calls for the same slug never both succeed. Expired entries are
/// evicted lazily when touched. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    mappings: DashMap<String, Mapping>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using in-memory mapping store");
        Self::default()
    }

    /// Number of entries held, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[async_trait]
impl MappingStore for MemoryStore {
    async fn put(&self, mapping: &Mapping) -> Result<PutOutcome, StoreError> {
        match self.mappings.entry(mapping.slug.clone()) {
            Entry::Occupied(mut entry) => {
                if entry.get().is_expired() {
                    debug!("Replacing expired mapping {}", mapping.slug);
                    entry.insert(mapping.clone());
                    Ok(PutOutcome::Stored)
                } else {
                    Ok(PutOutcome::Occupied)
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(mapping.clone());
                Ok(PutOutcome::Stored)
            }
        }
    }

    async fn get(&self, slug: &str) -> Result<Option<String>, StoreError> {
        match self.mappings.get(slug) {
            None => return Ok(None),
            Some(mapping) if !mapping.is_expired() => return Ok(Some(mapping.target.clone())),
            Some(_) => {}
        }

        // The read guard is released above; removing while holding it would deadlock.
        if self
            .mappings
            .remove_if(slug, |_, mapping| mapping.is_expired())
            .is_some()
        {
            debug!("Evicted expired mapping {}", slug);
        }

        Ok(None)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
