//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use std::time::Duration;

use kernel::error::app_error::AppResult;
use kernel::repository::Repository;

use crate::domain::entity::{Session, User};
use crate::domain::value_object::{Email, SessionToken};
use crate::error::AuthResult;

/// User repository trait
///
/// CRUD comes from [`Repository<User>`] and may be served through the entity
/// cache. Email lookups always hit the source of truth.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository: Repository<User> {
    /// Find a live (not soft-deleted) user by normalized email
    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>>;
}

/// Token-to-session mapping with expiry
///
/// `put` overwrites. `get` on an absent or expired token is `Ok(None)`.
/// `delete` on an absent token succeeds.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    async fn put(&self, token: &SessionToken, session: &Session, ttl: Duration) -> AuthResult<()>;

    async fn get(&self, token: &SessionToken) -> AuthResult<Option<Session>>;

    async fn delete(&self, token: &SessionToken) -> AuthResult<()>;
}
