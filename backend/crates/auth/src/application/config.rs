//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::password::HashingCost;

/// Default session lifetime (24 hours)
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 3600);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Fixed session lifetime from login. Validation never extends it.
    pub session_ttl: Duration,
    /// Argon2id cost for new hashes
    pub password_cost: HashingCost,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl: DEFAULT_SESSION_TTL,
            password_cost: HashingCost::default(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Session TTL in whole seconds, as reported to clients
    pub fn session_ttl_secs(&self) -> u64 {
        self.session_ttl.as_secs()
    }
}
