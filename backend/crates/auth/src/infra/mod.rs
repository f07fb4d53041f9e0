//! Infrastructure Layer
//!
//! Database, in-memory and key-value store implementations.

pub mod cached;
pub mod memory;
pub mod postgres;
pub mod session_store;

pub use memory::MemoryUserRepository;
pub use postgres::PgUserRepository;
pub use session_store::KvSessionStore;
