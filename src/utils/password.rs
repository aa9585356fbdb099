//! Opaque one-way hash/verify capability over bcrypt.

use bcrypt::{DEFAULT_COST, hash, verify};

use taskhive_core::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {e}")))
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    verify(password, password_hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify password: {e}")))
}
