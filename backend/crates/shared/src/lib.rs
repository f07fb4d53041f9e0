//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every domain crate agrees on:
//! - Common error types and result aliases
//! - Typed entity identifiers
//! - The entity/repository contract used by persistence and caching layers
//! - Pagination parameters for listing queries
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod pagination;
pub mod repository;
