//! 访问令牌网关中间件

use crate::{
    auth::jwt::{Claims, JwtService},
    error::AppError,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// 认证上下文（附加到请求扩展）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AuthContext
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::TokenRequired)
    }
}

/// 从 Authorization 头提取令牌
///
/// 令牌以原始形式放在头中，不带 `Bearer ` 前缀；头的值原样交给校验。
pub fn extract_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers.get(AUTHORIZATION).ok_or(AppError::TokenRequired)?;
    let token = value.to_str().map_err(|_| AppError::TokenInvalid)?;

    if token.is_empty() {
        return Err(AppError::TokenRequired);
    }

    Ok(token)
}

/// 令牌网关 - 必须认证
pub async fn require_token(
    State(jwt_service): State<Arc<JwtService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = {
        let token = extract_token(req.headers())?;
        jwt_service.verify(token)?
    };

    tracing::debug!(user_id = claims.user_id, username = %claims.username, "Token accepted");

    // 附加到请求扩展
    req.extensions_mut().insert(AuthContext::from(claims));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_raw() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "test_token_123".parse().unwrap());

        assert_eq!(extract_token(&headers).unwrap(), "test_token_123");
    }

    #[test]
    fn test_extract_token_keeps_bearer_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer test_token_123".parse().unwrap());

        // 前缀不剥离，随后的签名校验会拒绝它
        assert_eq!(extract_token(&headers).unwrap(), "Bearer test_token_123");
    }

    #[test]
    fn test_extract_token_missing() {
        let headers = HeaderMap::new();
        assert!(matches!(extract_token(&headers), Err(AppError::TokenRequired)));
    }

    #[test]
    fn test_extract_token_empty() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "".parse().unwrap());

        assert!(matches!(extract_token(&headers), Err(AppError::TokenRequired)));
    }
}
