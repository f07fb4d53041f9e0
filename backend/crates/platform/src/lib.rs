//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random tokens, SHA-256, Base64)
//! - Password hashing (Argon2id with optional pepper)
//! - Bearer token extraction from HTTP headers

pub mod bearer;
pub mod crypto;
pub mod password;
