//! Password hashing.
//!
//! bcrypt is deliberately slow, so both operations run on the blocking pool
//! instead of stalling a runtime worker thread.

use crate::error::{AppError, AppResult};
use tokio::task;

/// Hash a plaintext password with the given bcrypt cost.
///
/// The result is a self-describing `$2b$...` string that carries its own salt.
pub async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    let hash = task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))??;

    Ok(hash)
}

/// Check a plaintext password against a stored hash.
///
/// A wrong password is `Ok(false)`; `Err` means the stored hash is unusable.
pub async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    let matches = task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))??;

    Ok(matches)
}
