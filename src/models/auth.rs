//! Authentication-related models

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register / login request body. Both fields may be absent on the wire.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct Credentials {
    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub username: Option<String>,

    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

impl Credentials {
    /// Returns `(username, password)` when both are present and non-empty
    pub fn require(self) -> Result<(String, String), AppError> {
        self.validate().map_err(|_| AppError::MissingCredentials)?;

        match (self.username, self.password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(AppError::MissingCredentials),
        }
    }
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

impl LoginResponse {
    pub fn welcome(username: &str, token: String) -> Self {
        Self {
            message: format!("welcome, {}", username),
            token,
        }
    }
}
