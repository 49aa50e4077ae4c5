//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::observability::ObservabilityConfig;

/// 默认 SQLite 数据库文件（不存在时自动创建）
pub const DEFAULT_SQLITE_URL: &str = "sqlite://erp.db?mode=rwc";

/// 内存 SQLite，进程退出后数据丢失
pub const IN_MEMORY_SQLITE_URL: &str = "sqlite::memory:";

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SQLITE_URL.to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: 600,
        }
    }
}

impl DatabaseConfig {
    /// 是否为内存数据库
    ///
    /// 内存库的数据只存在于单个连接中，连接池必须固定为一个连接
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// CORS 配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// 允许的来源，逗号分隔；"*" 表示任意来源
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "erp-api".to_string(),
            environment: "development".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cors: CorsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. .env 文件（仅填充尚未设置的环境变量）
    /// 2. config/default.toml
    /// 3. config/{environment}.toml
    /// 4. config/{service_name}.toml
    /// 5. 环境变量（ERP_ 前缀，双下划线分隔层级，如 ERP_DATABASE__URL -> database.url）
    /// 6. 部署平台约定的变量：PORT、DATABASE_URL、IN_MEMORY_DB、CORS_ORIGINS
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(Path::new(&config_dir).join("default.toml")).required(false))
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", env))).required(false),
            )
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", service_name)))
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("ERP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_platform_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// 应用部署平台约定的环境变量
    ///
    /// - `PORT`：监听端口
    /// - `DATABASE_URL`：包含 postgres 时切换到 PostgreSQL，sqlite: 开头时使用指定文件
    /// - `IN_MEMORY_DB=true`：未指定 PostgreSQL 时改用内存 SQLite
    /// - `CORS_ORIGINS`：允许的来源列表
    pub fn apply_platform_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").and_then(|v| v.trim().parse().ok()) {
            self.server.port = port;
        }

        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        let uses_postgres = match database_url {
            Some(url) if url.contains("postgres") => {
                self.database.url = url;
                true
            }
            Some(url) if url.starts_with("sqlite:") => {
                self.database.url = url;
                false
            }
            _ => self.database.url.starts_with("postgres"),
        };

        if !uses_postgres && lookup("IN_MEMORY_DB").is_some_and(|v| v == "true") {
            self.database.url = IN_MEMORY_SQLITE_URL.to_string();
        }

        if let Some(origins) = lookup("CORS_ORIGINS").filter(|v| !v.trim().is_empty()) {
            self.cors.allowed_origins = origins;
        }
    }

    /// 获取服务地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否为开发环境（panic 响应中会带上详细信息）
    pub fn is_development(&self) -> bool {
        self.environment.is_empty() || self.environment == "development"
    }
}
