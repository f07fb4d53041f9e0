//! Infrastructure Layer

pub mod cached;
pub mod memory;
pub mod postgres;

pub use memory::MemoryBookRepository;
pub use postgres::PgBookRepository;
