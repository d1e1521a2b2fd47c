//! 测试公共模块
//! 提供测试辅助函数和测试工具

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use jokes_gateway::{
    auth::PasswordHasher,
    config::{AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig},
    db,
    middleware::AppState,
    routes,
};
use secrecy::Secret;
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-min-32-chars";

/// 创建测试配置（内存 SQLite，单连接保证所有查询落在同一个库上）
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            graceful_shutdown_timeout_secs: 5,
            environment: "development".to_string(),
            body_limit_bytes: 64 * 1024,
        },
        database: DatabaseConfig {
            url: Secret::new("sqlite::memory:".to_string()),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Some(Secret::new(TEST_SECRET.to_string())),
            token_exp_secs: 3600,
            // 测试中使用最低成本，加快哈希
            password_hash_cost: 1,
        },
    }
}

/// 初始化测试数据库
pub async fn setup_test_db(config: &AppConfig) -> SqlitePool {
    let pool = db::create_pool(&config.database)
        .await
        .expect("Failed to create test database pool");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// 创建测试应用状态
pub async fn create_test_app_state(pool: SqlitePool) -> Arc<AppState> {
    let config = create_test_config();
    Arc::new(AppState::new(config, pool).expect("Failed to build app state"))
}

/// 创建完整的测试应用
pub async fn create_test_app() -> Router {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    routes::create_router(create_test_app_state(pool).await)
}

/// 直接写库创建测试用户
pub async fn create_test_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<i64, Box<dyn std::error::Error>> {
    let hasher = PasswordHasher::with_cost(1)?;
    let password_hash = hasher.hash(password)?;

    let id: i64 =
        sqlx::query_scalar("INSERT INTO users (username, password) VALUES (?1, ?2) RETURNING id")
            .bind(username)
            .bind(&password_hash)
            .fetch_one(pool)
            .await?;

    Ok(id)
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn post_raw(app: &Router, uri: &str, body: &'static str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn get(app: &Router, uri: &str, authorization: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// 注册并登录，返回令牌
pub async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let credentials = serde_json::json!({ "username": username, "password": password });
    post_json(app, "/api/auth/register", credentials.clone()).await;

    let response = post_json(app, "/api/auth/login", credentials).await;
    let json = read_json(response).await;
    json["token"].as_str().expect("login should return a token").to_string()
}
