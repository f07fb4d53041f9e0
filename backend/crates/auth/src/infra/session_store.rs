//! Session Store over a TTL key-value backend
//!
//! Sessions are stored as JSON under `session:<token>` with the session TTL
//! as the key's expiry, so the backend drops them on its own.

use std::sync::Arc;
use std::time::Duration;

use cache::{CacheKey, KvStore};

use crate::domain::entity::Session;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::SessionToken;
use crate::error::{AuthError, AuthResult};

pub struct KvSessionStore<K> {
    store: Arc<K>,
}

impl<K> KvSessionStore<K>
where
    K: KvStore + Sync,
{
    pub fn new(store: Arc<K>) -> Self {
        Self { store }
    }
}

impl<K> SessionStore for KvSessionStore<K>
where
    K: KvStore + Sync,
{
    async fn put(&self, token: &SessionToken, session: &Session, ttl: Duration) -> AuthResult<()> {
        let json = serde_json::to_string(session)
            .map_err(|e| AuthError::Internal(format!("Session encoding failed: {}", e)))?;

        self.store
            .set(&CacheKey::session(token.as_str()), json, ttl)
            .await?;
        Ok(())
    }

    async fn get(&self, token: &SessionToken) -> AuthResult<Option<Session>> {
        let Some(raw) = self.store.get(&CacheKey::session(token.as_str())).await? else {
            return Ok(None);
        };

        // An undecodable entry is an error, not a miss, so callers reject it
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| AuthError::Internal(format!("Session decoding failed: {}", e)))
    }

    async fn delete(&self, token: &SessionToken) -> AuthResult<()> {
        self.store
            .delete(&CacheKey::session(token.as_str()))
            .await?;
        Ok(())
    }
}
