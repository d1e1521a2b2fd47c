//! Password hashing and verification using Argon2id

use crate::{config::AppConfig, error::AppError};
use argon2::{Algorithm, Argon2, Params, Version};
use password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use rand::rngs::OsRng;

/// Password hasher with a configurable cost factor
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create hasher with default parameters (OWASP minimum: m=19MiB, t=2, p=1)
    pub fn new() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
        }
    }

    /// Create hasher with the given time cost (number of passes over memory)
    pub fn with_cost(time_cost: u32) -> Result<Self, AppError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            time_cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| AppError::Config(format!("Invalid Argon2 params: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::with_cost(config.security.password_hash_cost)
    }

    /// Hash a password
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {:?}", e);
                AppError::Internal(format!("Failed to hash password: {}", e))
            })?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a password against a stored hash.
    ///
    /// A mismatch is reported as `InvalidCredentials`; a hash that cannot be
    /// parsed is an internal error since it can only come from bad data.
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), AppError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            tracing::debug!("Failed to parse password hash: {:?}", e);
            AppError::Internal(format!("Failed to parse password hash: {}", e))
        })?;

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::InvalidCredentials)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::with_cost(1).unwrap();
        let password = "password123";

        let hash = hasher.hash(password).unwrap();
        assert_ne!(hash, password);
        hasher.verify(password, &hash).unwrap();
    }

    #[test]
    fn test_verify_fails_with_wrong_password() {
        let hasher = PasswordHasher::with_cost(1).unwrap();

        let hash = hasher.hash("password123").unwrap();
        assert!(matches!(
            hasher.verify("wrongpassword", &hash),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_cost_is_encoded_in_hash() {
        let hash = PasswordHasher::with_cost(3).unwrap().hash("pw").unwrap();
        assert!(hash.contains("t=3"));
    }

    #[test]
    fn test_zero_cost_rejected() {
        assert!(matches!(PasswordHasher::with_cost(0), Err(AppError::Config(_))));
    }
}
