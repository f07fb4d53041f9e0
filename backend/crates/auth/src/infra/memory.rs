//! In-memory User Repository
//!
//! Source of truth for development without PostgreSQL, and for tests.
//! Enforces the same email uniqueness as the database index.

use std::collections::HashMap;

use kernel::error::app_error::{AppError, AppResult};
use kernel::id::UserId;
use kernel::repository::Repository;
use tokio::sync::RwLock;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::Email;

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository<User> for MemoryUserRepository {
    async fn create(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.user_id) || users.values().any(|u| u.email == user.email) {
            return Err(AppError::conflict("Duplicate key value"));
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.email == user.email && u.user_id != user.user_id)
        {
            return Err(AppError::conflict("Duplicate key value"));
        }

        match users.get_mut(&user.user_id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AppError::not_found("User not found")),
        }
    }

    async fn delete(&self, user_id: &UserId) -> AppResult<()> {
        match self.users.write().await.remove(user_id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("User not found")),
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }
}

impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }
}
