//! Get User Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::UserProfile;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct GetUserUseCase<U>
where
    U: UserRepository,
{
    users: Arc<U>,
}

impl<U> GetUserUseCase<U>
where
    U: UserRepository + Sync,
{
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<UserProfile> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user.profile())
    }
}
