//! 认证服务：注册、登录

use crate::{
    auth::{jwt::JwtService, password::PasswordHasher},
    error::AppError,
    models::{auth::LoginResponse, user::User},
    repository::user_repo::UserRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct AuthService {
    db: SqlitePool,
    jwt_service: Arc<JwtService>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(db: SqlitePool, jwt_service: Arc<JwtService>, hasher: PasswordHasher) -> Self {
        Self {
            db,
            jwt_service,
            hasher,
        }
    }

    /// 用户注册
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        if user_repo.exists(username).await? {
            tracing::info!(%username, "Registration rejected: username taken");
            metrics::counter!("auth_register_total", "outcome" => "taken").increment(1);
            return Err(AppError::UsernameTaken);
        }

        let password_hash = self.hash_password(password.to_string()).await?;

        // 唯一约束兜底并发注册
        let id = match user_repo.create(username, &password_hash).await {
            Ok(id) => id,
            Err(AppError::UsernameTaken) => {
                tracing::info!(%username, "Registration lost a race on username");
                metrics::counter!("auth_register_total", "outcome" => "taken").increment(1);
                return Err(AppError::UsernameTaken);
            }
            Err(e) => return Err(e),
        };

        let user = user_repo.find_by_id(id).await?.ok_or_else(|| {
            AppError::Internal(format!("User {} missing after insert", id))
        })?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        metrics::counter!("auth_register_total", "outcome" => "created").increment(1);

        Ok(user)
    }

    /// 用户登录
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        // 用户不存在与密码错误返回相同错误
        let user = match user_repo.find_by_username(username).await? {
            Some(user) => user,
            None => {
                tracing::info!(%username, "Login failed");
                metrics::counter!("auth_login_total", "outcome" => "rejected").increment(1);
                return Err(AppError::InvalidCredentials);
            }
        };

        if let Err(e) = self.verify_password(password.to_string(), user.password.clone()).await {
            if matches!(e, AppError::InvalidCredentials) {
                tracing::info!(%username, "Login failed");
                metrics::counter!("auth_login_total", "outcome" => "rejected").increment(1);
            }
            return Err(e);
        }

        let token = self.jwt_service.issue(user.id, &user.username)?;

        tracing::info!(user_id = user.id, username = %user.username, "Login succeeded");
        metrics::counter!("auth_login_total", "outcome" => "success").increment(1);

        Ok(LoginResponse::welcome(&user.username, token))
    }

    // Argon2 是 CPU 密集型操作，放到阻塞线程池执行
    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<(), AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
    }
}
