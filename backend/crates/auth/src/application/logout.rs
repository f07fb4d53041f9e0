//! Logout Use Case
//!
//! Revokes a session. Idempotent: unknown or malformed tokens succeed.

use std::sync::Arc;

use crate::domain::repository::SessionStore;
use crate::domain::value_object::SessionToken;
use crate::error::AuthResult;

pub struct LogoutUseCase<S>
where
    S: SessionStore,
{
    sessions: Arc<S>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionStore + Sync,
{
    pub fn new(sessions: Arc<S>) -> Self {
        Self { sessions }
    }

    /// A store failure is returned: the caller must not assume the token
    /// has been revoked.
    pub async fn execute(&self, raw_token: &str) -> AuthResult<()> {
        let Some(token) = SessionToken::parse(raw_token) else {
            tracing::debug!("Logout with malformed token ignored");
            return Ok(());
        };

        self.sessions.delete(&token).await?;

        tracing::info!(session_ref = %token.reference(), "User signed out");
        Ok(())
    }
}
