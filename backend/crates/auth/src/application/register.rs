//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use kernel::error::kind::ErrorKind;
use platform::password::{ClearTextPassword, PasswordHasher};

use crate::application::credentials;
use crate::domain::entity::{User, UserProfile};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, UserName};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    users: Arc<U>,
    hasher: Arc<PasswordHasher>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository + Sync,
{
    pub fn new(users: Arc<U>, hasher: Arc<PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<UserProfile> {
        // Validate everything before touching storage
        let name =
            UserName::new(&input.name).map_err(|e| AuthError::Validation(e.message().into()))?;
        let email =
            Email::new(&input.email).map_err(|e| AuthError::Validation(e.message().into()))?;
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::DuplicateIdentity);
        }

        let password_hash = credentials::hash(&self.hasher, password).await?;
        let user = User::new(name, email, password_hash);

        // A concurrent registration can still win the race; the unique
        // index is the final word.
        self.users.create(&user).await.map_err(|e| match e.kind() {
            ErrorKind::Conflict => AuthError::DuplicateIdentity,
            _ => AuthError::from(e),
        })?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(user.profile())
    }
}
