//! Application Layer

pub mod ownership;
pub mod service;

pub use ownership::OwnershipPolicy;
pub use service::{BookPage, BookService, CreateBookInput, UpdateBookInput};
