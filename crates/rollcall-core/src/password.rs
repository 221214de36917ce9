//! Password hashing with bcrypt.

use std::sync::OnceLock;

use bcrypt::{hash, verify};

use crate::errors::AppError;

/// Hashes with an explicit bcrypt cost. Seeding and tests use a low cost.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

const DUMMY_PASSWORD: &str = "rollcall-unknown-account";

/// A throwaway bcrypt hash checked when no account matches a login, so that
/// the request costs one bcrypt verification either way.
///
/// The hash is built on first use at the configured cost.
#[derive(Debug)]
pub struct DummyHash {
    cost: u32,
    hash: OnceLock<String>,
}

impl DummyHash {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            hash: OnceLock::new(),
        }
    }

    /// Builds the hash now instead of on the first unknown-account login.
    pub fn prime(&self) -> Result<(), AppError> {
        self.get().map(|_| ())
    }

    /// Runs a full verification of `password` against the dummy hash.
    pub fn verify(&self, password: &str) -> Result<bool, AppError> {
        verify_password(password, self.get()?)
    }

    fn get(&self) -> Result<&str, AppError> {
        if let Some(hash) = self.hash.get() {
            return Ok(hash);
        }
        let hashed = hash_password_with_cost(DUMMY_PASSWORD, self.cost)?;
        Ok(self.hash.get_or_init(|| hashed))
    }
}
