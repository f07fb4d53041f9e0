//! Runtime-selected KV backend
//!
//! The server picks Redis when configured and falls back to the in-memory
//! store otherwise. One [`CacheBackend`] is built at startup and shared by
//! the session store and every cache-aside repository.

use std::time::Duration;

use crate::error::CacheResult;
use crate::key::CacheKey;
use crate::memory::MemoryStore;
use crate::redis_store::RedisStore;
use crate::store::KvStore;

pub enum CacheBackend {
    Redis(RedisStore),
    Memory(MemoryStore),
}

impl CacheBackend {
    pub fn name(&self) -> &'static str {
        match self {
            CacheBackend::Redis(_) => "redis",
            CacheBackend::Memory(_) => "memory",
        }
    }

    /// The in-memory store, if that is the active backend.
    pub fn as_memory(&self) -> Option<&MemoryStore> {
        match self {
            CacheBackend::Memory(store) => Some(store),
            CacheBackend::Redis(_) => None,
        }
    }
}

impl KvStore for CacheBackend {
    async fn set(&self, key: &CacheKey, value: String, ttl: Duration) -> CacheResult<()> {
        match self {
            CacheBackend::Redis(store) => store.set(key, value, ttl).await,
            CacheBackend::Memory(store) => store.set(key, value, ttl).await,
        }
    }

    async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>> {
        match self {
            CacheBackend::Redis(store) => store.get(key).await,
            CacheBackend::Memory(store) => store.get(key).await,
        }
    }

    async fn delete(&self, key: &CacheKey) -> CacheResult<()> {
        match self {
            CacheBackend::Redis(store) => store.delete(key).await,
            CacheBackend::Memory(store) => store.delete(key).await,
        }
    }
}
