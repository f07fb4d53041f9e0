//! Password hashing off the async runtime
//!
//! Argon2 is slow. These helpers move it to the blocking pool
//! so request tasks never stall a runtime worker.

use std::sync::Arc;

use platform::password::{ClearTextPassword, HashedPassword, PasswordHasher};
use tokio::task;

use crate::error::{AuthError, AuthResult};

pub(crate) async fn hash(
    hasher: &Arc<PasswordHasher>,
    password: ClearTextPassword,
) -> AuthResult<HashedPassword> {
    let hasher = Arc::clone(hasher);
    task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AuthError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AuthError::Internal(e.to_string()))
}

/// Verify against `stored`, or burn a dummy verification when there is no
/// account so both paths cost the same.
pub(crate) async fn verify(
    hasher: &Arc<PasswordHasher>,
    password: ClearTextPassword,
    stored: Option<HashedPassword>,
) -> AuthResult<bool> {
    let hasher = Arc::clone(hasher);
    task::spawn_blocking(move || match stored {
        Some(hashed) => hasher.verify(&password, &hashed),
        None => hasher.verify_dummy(&password),
    })
    .await
    .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))
}
