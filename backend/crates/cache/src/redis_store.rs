//! Redis-backed TTL Store

use std::time::Duration;

use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;

use crate::error::CacheResult;
use crate::key::CacheKey;
use crate::store::{KvStore, MAX_TTL};

/// [`KvStore`] over a single multiplexed Redis connection.
///
/// The connection is cheap to clone and safe to share between tasks; each
/// command clones it rather than locking.
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    /// Open a client for `url` (e.g. `redis://127.0.0.1:6379`) and connect.
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self { conn })
    }
}

/// Redis expiry has second granularity; never send 0, which it rejects.
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.min(MAX_TTL).as_secs().max(1)
}

impl KvStore for RedisStore {
    async fn set(&self, key: &CacheKey, value: String, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key.as_str(), value, ttl_secs(ttl)).await?;
        Ok(())
    }

    async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key.as_str()).await?;
        Ok(value)
    }

    async fn delete(&self, key: &CacheKey) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key.as_str()).await?;
        Ok(())
    }
}
