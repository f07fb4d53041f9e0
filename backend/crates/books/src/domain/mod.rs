//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{Book, BookPatch};
pub use repository::BookRepository;
pub use value_object::{BookAuthor, BookTitle};
