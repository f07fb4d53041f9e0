//! User Entity
//!
//! [`User`] is the persisted aggregate, password hash included. It is what
//! repositories and the entity cache hold. Everything that leaves the
//! service goes through [`UserProfile`], which has no hash field at all.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::repository::Entity;
use platform::password::HashedPassword;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{Email, UserName};

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: UserName,
    /// Login key, unique among live accounts
    pub email: Email,
    pub password_hash: HashedPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(name: UserName, email: Email, password_hash: HashedPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

impl Entity for User {
    type Id = UserId;
    const KIND: &'static str = "user";

    fn id(&self) -> &UserId {
        &self.user_id
    }
}

/// Outward-facing view of a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name.to_string(),
            email: user.email.to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
