//! In-memory TTL Store
//!
//! Process-local [`KvStore`] for development and tests. Expired entries are
//! hidden from `get` immediately and physically removed by
//! [`MemoryStore::purge_expired`].

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::CacheResult;
use crate::key::CacheKey;
use crate::store::{KvStore, MAX_TTL};

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired entry. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Number of stored entries, expired ones included until purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl KvStore for MemoryStore {
    async fn set(&self, key: &CacheKey, value: String, ttl: Duration) -> CacheResult<()> {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl.min(MAX_TTL),
        };
        self.entries
            .write()
            .await
            .insert(key.as_str().to_owned(), entry);
        Ok(())
    }

    async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key.as_str())
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn delete(&self, key: &CacheKey) -> CacheResult<()> {
        self.entries.write().await.remove(key.as_str());
        Ok(())
    }
}
