//! JWT session token signing and verification
//! One token type, HS256, fixed lifetime, no refresh

use crate::{config::AppConfig, error::AppError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session token claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// User ID
    pub user_id: i64,

    /// Username
    pub username: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_exp_secs: u64,
}

impl JwtService {
    pub fn new(secret: &str, token_exp_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `verify_at`
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_exp_secs,
        }
    }

    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        if config.security.jwt_secret.is_none() {
            if config.server.is_production() {
                return Err(AppError::Config("JWT secret must be set in production".to_string()));
            }
            tracing::warn!("No JWT secret configured, using insecure development secret");
        }

        Ok(Self::new(
            config.security.signing_secret(),
            config.security.token_exp_secs,
        ))
    }

    pub fn token_exp_secs(&self) -> u64 {
        self.token_exp_secs
    }

    /// Sign a token for the user, expiring `token_exp_secs` from now
    pub fn issue(&self, user_id: i64, username: &str) -> Result<String, AppError> {
        self.issue_at(user_id, username, Utc::now())
    }

    pub fn issue_at(
        &self,
        user_id: i64,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let expiration = now + Duration::seconds(self.token_exp_secs as i64);

        let claims = Claims {
            user_id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal(format!("Failed to encode token: {}", e))
        })
    }

    /// Validate and decode a token against the current time
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        self.verify_at(token, Utc::now())
    }

    /// Validate and decode a token against `now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                AppError::TokenInvalid
            })?
            .claims;

        if claims.exp <= now.timestamp() {
            tracing::debug!(exp = claims.exp, "Token expired");
            return Err(AppError::TokenInvalid);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_32_characters_long!";

    #[test]
    fn test_issue_and_verify() {
        let service = JwtService::new(SECRET, 3600);

        let token = service.issue(7, "testuser").unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "testuser");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_claims_use_camel_case() {
        let claims = Claims {
            user_id: 1,
            username: "a".to_string(),
            iat: 0,
            exp: 1,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], 1);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::new(SECRET, 3600);
        let issued = Utc::now() - Duration::hours(2);

        let token = service.issue_at(1, "testuser", issued).unwrap();

        assert!(matches!(service.verify(&token), Err(AppError::TokenInvalid)));
    }

    #[test]
    fn test_valid_until_expiry() {
        let service = JwtService::new(SECRET, 3600);
        let issued = Utc::now();
        let token = service.issue_at(1, "testuser", issued).unwrap();

        assert!(service
            .verify_at(&token, issued + Duration::seconds(3599))
            .is_ok());
        assert!(service
            .verify_at(&token, issued + Duration::seconds(3600))
            .is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtService::new(SECRET, 3600);
        let verifier = JwtService::new("another_secret_key_32_characters_long", 3600);

        let token = issuer.issue(1, "testuser").unwrap();
        assert!(matches!(verifier.verify(&token), Err(AppError::TokenInvalid)));
    }

    #[test]
    fn test_invalid_token_fails() {
        let service = JwtService::new(SECRET, 3600);
        assert!(matches!(
            service.verify("invalid-token"),
            Err(AppError::TokenInvalid)
        ));
    }
}
