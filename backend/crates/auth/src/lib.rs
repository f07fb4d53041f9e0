//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and session store traits
//! - `application/` - Use cases and the [`Authenticator`] facade
//! - `infra/` - PostgreSQL, in-memory and cache-backed implementations
//! - `presentation/` - HTTP handlers, DTOs, bearer middleware, router
//!
//! ## Features
//! - Registration with name, email and password
//! - Email + password login issuing opaque bearer tokens
//! - Server-side sessions in a TTL key-value store (revocable, no sliding expiry)
//! - Logout, current-user lookup and profile updates
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Unknown emails and wrong passwords are indistinguishable, including timing
//! - Session lookups fail closed: a store error rejects the token
//! - Tokens never appear in logs, only a short SHA-256 reference

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::authenticator::Authenticator;
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{
    memory::MemoryUserRepository, postgres::PgUserRepository, session_store::KvSessionStore,
};
pub use presentation::router::auth_router;

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
