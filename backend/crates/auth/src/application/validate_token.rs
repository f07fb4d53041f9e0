//! Validate Token Use Case
//!
//! Resolves a bearer token to its user. Read-only: validation never
//! extends a session.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;

use crate::domain::repository::SessionStore;
use crate::domain::value_object::SessionToken;
use crate::error::{AuthError, AuthResult};

pub struct ValidateTokenUseCase<S>
where
    S: SessionStore,
{
    sessions: Arc<S>,
}

impl<S> ValidateTokenUseCase<S>
where
    S: SessionStore + Sync,
{
    pub fn new(sessions: Arc<S>) -> Self {
        Self { sessions }
    }

    pub async fn execute(&self, raw_token: &str) -> AuthResult<UserId> {
        let token = SessionToken::parse(raw_token).ok_or(AuthError::InvalidSession)?;

        let session = match self.sessions.get(&token).await {
            Ok(Some(session)) => session,
            Ok(None) => return Err(AuthError::InvalidSession),
            Err(e) => {
                // Fail closed
                tracing::error!(
                    session_ref = %token.reference(),
                    error = %e,
                    "Session lookup failed, rejecting token"
                );
                return Err(AuthError::InvalidSession);
            }
        };

        if session.is_expired_at(Utc::now()) {
            return Err(AuthError::InvalidSession);
        }

        Ok(session.user_id)
    }
}
