//! Cache Crate - TTL key-value storage and the cache-aside repository
//!
//! - `store` - the key-value contract (`set` / `get` / `delete` with per-key TTL)
//! - `memory`, `redis_store` - process-local and Redis backends
//! - `aside` - read-through / write-invalidate decorator over any
//!   [`kernel::repository::Repository`]
//!
//! The cache is never authoritative. Every entry can be rebuilt from the
//! wrapped repository, and every write path deletes entries instead of
//! updating them.

pub mod aside;
pub mod backend;
pub mod config;
pub mod error;
pub mod key;
pub mod memory;
pub mod redis_store;
pub mod store;

pub use aside::CacheAsideRepository;
pub use backend::CacheBackend;
pub use config::CacheConfig;
pub use error::{CacheError, CacheResult};
pub use key::CacheKey;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use store::{KvStore, MAX_TTL};
