//! Cache Configuration

use std::time::Duration;

/// Default lifetime of a cached entity (5 minutes)
pub const DEFAULT_ENTITY_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Lifetime of entries written by read-through
    pub entity_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entity_ttl: DEFAULT_ENTITY_TTL,
        }
    }
}
