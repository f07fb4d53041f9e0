//! Book Value Objects
//!
//! Title and author are trimmed and required. Descriptions are free text;
//! a blank description is the same as none.

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

pub const TITLE_MAX_LENGTH: usize = 255;
pub const AUTHOR_MAX_LENGTH: usize = 100;

fn required(field: &str, raw: &str, max: usize) -> AppResult<String> {
    let value = raw.trim();

    if value.is_empty() {
        return Err(AppError::bad_request(format!("{} is required", field)));
    }
    if value.chars().count() > max {
        return Err(AppError::bad_request(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }

    Ok(value.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn new(raw: &str) -> AppResult<Self> {
        required("Title", raw, TITLE_MAX_LENGTH).map(Self)
    }

    pub fn from_db(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookAuthor(String);

impl BookAuthor {
    pub fn new(raw: &str) -> AppResult<Self> {
        required("Author", raw, AUTHOR_MAX_LENGTH).map(Self)
    }

    pub fn from_db(author: impl Into<String>) -> Self {
        Self(author.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookAuthor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim a description, mapping blank input to `None`.
pub fn normalize_description(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}
