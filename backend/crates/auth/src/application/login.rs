//! Login Use Case
//!
//! Verifies credentials and opens a session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::password::{ClearTextPassword, PasswordHasher};

use crate::application::config::AuthConfig;
use crate::application::credentials;
use crate::domain::entity::{Session, UserProfile};
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::{Email, SessionToken};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
    pub user: UserProfile,
}

/// Login use case
pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    users: Arc<U>,
    sessions: Arc<S>,
    hasher: Arc<PasswordHasher>,
    config: Arc<AuthConfig>,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository + Sync,
    S: SessionStore + Sync,
{
    pub fn new(
        users: Arc<U>,
        sessions: Arc<S>,
        hasher: Arc<PasswordHasher>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let password = ClearTextPassword::unvalidated(input.password);

        // A malformed email cannot have an account; treat it like an
        // unknown one, including the hashing cost.
        let user = match Email::new(&input.email) {
            Ok(email) => self.users.find_by_email(&email).await?,
            Err(_) => None,
        };

        let stored = user.as_ref().map(|u| u.password_hash.clone());
        let verified = credentials::verify(&self.hasher, password, stored).await?;

        let user = match user {
            Some(user) if verified => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let token = SessionToken::generate();
        let session = Session::start(user.user_id, self.config.session_ttl);

        self.sessions
            .put(&token, &session, self.config.session_ttl)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            session_ref = %token.reference(),
            "User signed in"
        );

        Ok(LoginOutput {
            token,
            expires_at: session.expires_at,
            user: user.profile(),
        })
    }
}
