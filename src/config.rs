//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

/// 开发环境下未配置签名密钥时使用的后备密钥（生产环境禁止使用）
pub const INSECURE_DEV_SECRET: &str = "insecure-development-secret-do-not-use!!";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址，例如 "0.0.0.0:5000"
    pub addr: String,
    /// 优雅关闭超时时间（秒）
    pub graceful_shutdown_timeout_secs: u64,
    /// 运行环境: development, production
    pub environment: String,
    /// 请求体大小上限（字节）
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库连接 URL（使用 Secret 包装，防止日志泄露）
    pub url: Secret<String>,
    /// 最大连接数
    pub max_connections: u32,
    /// 最小连接数
    pub min_connections: u32,
    /// 获取连接超时时间（秒）
    pub acquire_timeout_secs: u64,
    /// 空闲连接超时时间（秒）
    pub idle_timeout_secs: u64,
    /// 连接最大生命周期（秒）
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// JWT 签名密钥（生产环境必须设置）
    pub jwt_secret: Option<Secret<String>>,
    /// 会话令牌过期时间（秒）
    pub token_exp_secs: u64,
    /// Argon2 时间成本（迭代次数）
    pub password_hash_cost: u32,
}

impl SecurityConfig {
    /// 实际用于签名的密钥，未配置时回退到开发密钥
    pub fn signing_secret(&self) -> &str {
        self.jwt_secret
            .as_ref()
            .map(|s| s.expose_secret().as_str())
            .unwrap_or(INSECURE_DEV_SECRET)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("server.addr", "0.0.0.0:5000")?
            .set_default("server.graceful_shutdown_timeout_secs", 30)?
            .set_default("server.environment", "development")?
            .set_default("server.body_limit_bytes", 64 * 1024)?
            .set_default("database.url", "sqlite://gateway.db")?
            .set_default("database.max_connections", 5)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.idle_timeout_secs", 600)?
            .set_default("database.max_lifetime_secs", 1800)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default("security.token_exp_secs", 3600)?
            .set_default("security.password_hash_cost", 2)?;

        // 从环境变量加载配置（前缀为 GATEWAY_）
        settings = settings.add_source(
            Environment::with_prefix("GATEWAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 验证端口范围
        if let Some(port_str) = self.server.addr.split(':').next_back() {
            if let Ok(port) = port_str.parse::<u16>() {
                if port != 0 && port < 1024 {
                    return Err(ConfigError::Message("Server port should be >= 1024".to_string()));
                }
            }
        }

        match self.server.environment.to_lowercase().as_str() {
            "development" | "production" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid environment: {}. Must be one of: development, production",
                    self.server.environment
                )))
            }
        }

        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        // 验证日志格式
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        // 验证数据库连接池配置
        if self.database.max_connections < self.database.min_connections {
            return Err(ConfigError::Message(
                "max_connections must be >= min_connections".to_string(),
            ));
        }

        // 生产环境必须显式配置签名密钥，且至少 32 字符
        if self.server.is_production() {
            match &self.security.jwt_secret {
                None => {
                    return Err(ConfigError::Message(
                        "JWT secret must be set in production (GATEWAY_SECURITY__JWT_SECRET)"
                            .to_string(),
                    ))
                }
                Some(secret) if secret.expose_secret().len() < 32 => {
                    return Err(ConfigError::Message(
                        "JWT secret must be at least 32 characters long".to_string(),
                    ))
                }
                Some(_) => {}
            }
        }

        if self.security.token_exp_secs < 60 || self.security.token_exp_secs > 86400 {
            return Err(ConfigError::Message(
                "token_exp_secs must be between 60 and 86400 (1 minute to 24 hours)".to_string(),
            ));
        }

        if !(1..=16).contains(&self.security.password_hash_cost) {
            return Err(ConfigError::Message(
                "password_hash_cost must be between 1 and 16".to_string(),
            ));
        }

        Ok(())
    }
}
