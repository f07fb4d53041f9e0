//! Books Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Book entity, value objects, repository trait
//! - `application/` - [`BookService`] and the [`OwnershipPolicy`]
//! - `infra/` - PostgreSQL, in-memory and cache-backed repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Every route expects the caller's `UserId` in the request extensions.
//! The router does not authenticate on its own: mount it behind the
//! auth crate's `require_bearer` middleware.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{BookService, OwnershipPolicy};
pub use error::{BookError, BookResult};
pub use infra::{MemoryBookRepository, PgBookRepository};
pub use presentation::router::books_router;
