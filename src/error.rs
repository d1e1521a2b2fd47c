//! 统一错误模型
//! 定义所有错误类型和错误响应格式

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("username and password required")]
    MissingCredentials,

    #[error("username taken")]
    UsernameTaken,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token required")]
    TokenRequired,

    #[error("token invalid")]
    TokenInvalid,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingCredentials | AppError::UsernameTaken => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::TokenRequired | AppError::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            client_error => client_error.to_string(),
        }
    }

    /// 获取错误码
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

/// 服务端错误响应 DTO
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 客户端错误直接返回 JSON 字符串
        if !self.is_server_error() {
            tracing::debug!(code = self.code(), message = %self, "Request rejected");
            return (status, Json(self.user_message())).into_response();
        }

        let request_id = uuid::Uuid::new_v4().to_string();

        // 记录错误日志（详细信息只写日志，不返回给客户端）
        tracing::error!(
            code = self.code(),
            message = %self,
            request_id = %request_id,
            "Application error"
        );

        let error_response = ErrorResponse {
            message: self.user_message(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}
