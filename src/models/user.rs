//! User domain models

use serde::{Deserialize, Serialize};

/// Stored user record. `password` holds the Argon2 hash, never the plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}
