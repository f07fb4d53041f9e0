//! Key-Value Store Contract

use std::time::Duration;

use crate::error::CacheResult;
use crate::key::CacheKey;

/// Longest lifetime a stored value can get. Backends clamp larger TTLs.
pub const MAX_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 3600);

/// TTL-capable key-value store.
///
/// A miss is `Ok(None)`, never an error. `set` overwrites any existing value
/// and resets its TTL. `delete` on an absent key succeeds.
#[trait_variant::make(KvStore: Send)]
pub trait LocalKvStore {
    async fn set(&self, key: &CacheKey, value: String, ttl: Duration) -> CacheResult<()>;

    async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>>;

    async fn delete(&self, key: &CacheKey) -> CacheResult<()>;
}
