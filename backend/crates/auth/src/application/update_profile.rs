//! Update Profile Use Case
//!
//! Changes a user's display name and/or email. Writes go through the
//! repository's `update`, so a cache-aside wrapper drops its stale entry.

use std::sync::Arc;

use chrono::Utc;
use kernel::error::kind::ErrorKind;
use kernel::id::UserId;

use crate::domain::entity::UserProfile;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, UserName};
use crate::error::{AuthError, AuthResult};

/// Update profile input. `None` leaves the field unchanged.
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    users: Arc<U>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository + Sync,
{
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        input: UpdateProfileInput,
    ) -> AuthResult<UserProfile> {
        let name = input
            .name
            .as_deref()
            .map(UserName::new)
            .transpose()
            .map_err(|e| AuthError::Validation(e.message().into()))?;
        let email = input
            .email
            .as_deref()
            .map(Email::new)
            .transpose()
            .map_err(|e| AuthError::Validation(e.message().into()))?;

        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Some(email) = email
            && email != user.email
        {
            let taken = self.users.find_by_email(&email).await?;
            if taken.is_some_and(|other| other.user_id != user.user_id) {
                return Err(AuthError::DuplicateIdentity);
            }
            user.email = email;
        }
        if let Some(name) = name {
            user.name = name;
        }
        user.updated_at = Utc::now();

        self.users.update(&user).await.map_err(|e| match e.kind() {
            ErrorKind::Conflict => AuthError::DuplicateIdentity,
            ErrorKind::NotFound => AuthError::UserNotFound,
            _ => AuthError::from(e),
        })?;

        tracing::info!(user_id = %user.user_id, "Profile updated");

        Ok(user.profile())
    }
}
