//! Cache Error Types

use kernel::error::app_error::AppError;
use thiserror::Error;

pub type CacheResult<T> = Result<T, CacheError>;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend refused or could not complete the operation
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        AppError::internal("Cache operation failed").with_source(err)
    }
}
