//! Authenticator
//!
//! Single entry point for identity: registration, login, token validation,
//! logout, user lookup and profile updates. Each operation delegates to its use case; this
//! type only wires them to shared dependencies.
//!
//! ## Token lifecycle
//! `absent --login--> active --logout | ttl--> absent`
//!
//! A revoked or expired token never validates again.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::PasswordHasher;

use crate::application::config::AuthConfig;
use crate::application::get_user::GetUserUseCase;
use crate::application::login::{LoginInput, LoginOutput, LoginUseCase};
use crate::application::logout::LogoutUseCase;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::application::update_profile::{UpdateProfileInput, UpdateProfileUseCase};
use crate::application::validate_token::ValidateTokenUseCase;
use crate::domain::entity::UserProfile;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::error::{AuthError, AuthResult};

pub struct Authenticator<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    register: RegisterUseCase<U>,
    login: LoginUseCase<U, S>,
    validate: ValidateTokenUseCase<S>,
    logout: LogoutUseCase<S>,
    get_user: GetUserUseCase<U>,
    update_profile: UpdateProfileUseCase<U>,
    config: Arc<AuthConfig>,
}

impl<U, S> Authenticator<U, S>
where
    U: UserRepository + Sync,
    S: SessionStore + Sync,
{
    /// Fails only if the configured hashing cost is invalid.
    pub fn new(users: Arc<U>, sessions: Arc<S>, config: AuthConfig) -> AuthResult<Self> {
        let hasher = PasswordHasher::new(config.password_cost, config.password_pepper.clone())
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let hasher = Arc::new(hasher);
        let config = Arc::new(config);

        Ok(Self {
            register: RegisterUseCase::new(users.clone(), hasher.clone()),
            login: LoginUseCase::new(users.clone(), sessions.clone(), hasher, config.clone()),
            validate: ValidateTokenUseCase::new(sessions.clone()),
            logout: LogoutUseCase::new(sessions),
            get_user: GetUserUseCase::new(users.clone()),
            update_profile: UpdateProfileUseCase::new(users),
            config,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub async fn register(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> AuthResult<UserProfile> {
        self.register
            .execute(RegisterInput {
                name: name.into(),
                email: email.into(),
                password: password.into(),
            })
            .await
    }

    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> AuthResult<LoginOutput> {
        self.login
            .execute(LoginInput {
                email: email.into(),
                password: password.into(),
            })
            .await
    }

    pub async fn validate_token(&self, token: &str) -> AuthResult<UserId> {
        self.validate.execute(token).await
    }

    pub async fn logout(&self, token: &str) -> AuthResult<()> {
        self.logout.execute(token).await
    }

    pub async fn get_user_by_id(&self, user_id: &UserId) -> AuthResult<UserProfile> {
        self.get_user.execute(user_id).await
    }

    /// Change name and/or email. An email owned by another account is
    /// [`AuthError::DuplicateIdentity`].
    pub async fn update_profile(
        &self,
        user_id: &UserId,
        name: Option<String>,
        email: Option<String>,
    ) -> AuthResult<UserProfile> {
        self.update_profile
            .execute(user_id, UpdateProfileInput { name, email })
            .await
    }
}
