//! 认证相关的 HTTP 处理器

use crate::{error::AppError, middleware::AppState, models::auth::Credentials};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// 注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let (username, password) = read_credentials(payload)?;

    let user = state.auth_service.register(&username, &password).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let (username, password) = read_credentials(payload)?;

    let response = state.auth_service.login(&username, &password).await?;

    Ok(Json(response))
}

// 无法解析的请求体按缺少凭据处理
fn read_credentials(
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<(String, String), AppError> {
    let Json(credentials) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "Unreadable credentials body");
        AppError::MissingCredentials
    })?;

    credentials.require()
}
