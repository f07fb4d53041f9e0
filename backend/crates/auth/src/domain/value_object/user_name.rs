//! User Name Value Object
//!
//! Display name chosen at registration. Not an identifier: duplicates are
//! allowed and login never uses it.
//!
//! ## Invariants
//! - NFKC normalized, surrounding whitespace trimmed
//! - 2 to 100 characters after normalization
//! - No control characters

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

pub const USER_NAME_MIN_LENGTH: usize = 2;
pub const USER_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: &str) -> AppResult<Self> {
        let normalized: String = raw.nfkc().collect();
        let name = normalized.trim();

        let len = name.chars().count();
        if len < USER_NAME_MIN_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at least {} characters",
                USER_NAME_MIN_LENGTH
            )));
        }
        if len > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters",
                USER_NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request("Name contains invalid characters"));
        }

        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
