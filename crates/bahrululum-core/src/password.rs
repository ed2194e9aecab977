use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

/// Compares a plaintext password with a stored bcrypt hash.
///
/// A malformed hash is treated as a mismatch rather than an error.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    verify(password, hashed).unwrap_or(false)
}
