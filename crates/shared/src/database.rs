//! 数据库连接管理模块
//!
//! 通过 sqlx 的 Any 驱动在运行时选择 PostgreSQL 或 SQLite，
//! 并按方言生成 SQL 占位符（PostgreSQL 使用 `$N`，SQLite 使用 `?N`）。

use crate::config::DatabaseConfig;
use crate::error::{Result, SharedError};
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;
use std::borrow::Cow;
use std::time::Duration;
use tracing::{info, instrument};

/// SQL 方言
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    /// 根据连接地址推断方言
    pub fn from_url(url: &str) -> Result<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Self::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else {
            Err(SharedError::UnsupportedDatabase(redact_url(url)))
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }

    /// 第 n 个参数的占位符（从 1 开始）
    pub fn placeholder(&self, n: usize) -> String {
        match self {
            Self::Postgres => format!("${}", n),
            Self::Sqlite => format!("?{}", n),
        }
    }

    /// 将 `$N` 风格的 SQL 转换为当前方言
    ///
    /// 仓储层统一用 `$N` 书写 SQL，SQLite 下改写为编号相同的 `?N`，
    /// 因此同一个参数可以在语句中多次引用。
    pub fn sql<'a>(&self, query: &'a str) -> Cow<'a, str> {
        match self {
            Self::Postgres => Cow::Borrowed(query),
            Self::Sqlite => {
                let mut out = String::with_capacity(query.len());
                let mut chars = query.chars().peekable();
                while let Some(c) = chars.next() {
                    if c == '$' && chars.peek().is_some_and(|next| next.is_ascii_digit()) {
                        out.push('?');
                    } else {
                        out.push(c);
                    }
                }
                Cow::Owned(out)
            }
        }
    }

    /// 行级锁子句，SQLite 的写事务本身是串行的，不需要
    pub fn lock_for_update(&self) -> &'static str {
        match self {
            Self::Postgres => " FOR UPDATE",
            Self::Sqlite => "",
        }
    }

    /// 64 位整数列类型
    pub fn integer_type(&self) -> &'static str {
        match self {
            Self::Postgres => "BIGINT",
            Self::Sqlite => "INTEGER",
        }
    }

    /// 金额列类型
    pub fn real_type(&self) -> &'static str {
        match self {
            Self::Postgres => "DOUBLE PRECISION",
            Self::Sqlite => "REAL",
        }
    }

    /// 主键 / 短文本列类型
    pub fn key_type(&self) -> &'static str {
        match self {
            Self::Postgres => "VARCHAR(255)",
            Self::Sqlite => "TEXT",
        }
    }
}

/// 动态 SQL 的占位符计数器
///
/// 用于拼接可选的 WHERE 条件，保证编号与绑定顺序一致
#[derive(Debug)]
pub struct Placeholders {
    dialect: Dialect,
    count: usize,
}

impl Placeholders {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect, count: 0 }
    }

    /// 分配下一个占位符
    pub fn next(&mut self) -> String {
        self.count += 1;
        self.dialect.placeholder(self.count)
    }

    /// 已分配的占位符数量
    pub fn count(&self) -> usize {
        self.count
    }
}

/// 隐藏连接地址中的密码，避免写入日志
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let credentials = &url[scheme_end + 3..at];
            match credentials.find(':') {
                Some(colon) => format!(
                    "{}{}:****{}",
                    &url[..scheme_end + 3],
                    &credentials[..colon],
                    &url[at..]
                ),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}

/// 数据库连接池包装
#[derive(Clone, Debug)]
pub struct Database {
    pool: AnyPool,
    dialect: Dialect,
}

impl Database {
    /// 创建数据库连接池
    #[instrument(skip(config))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let dialect = Dialect::from_url(&config.url)?;
        info!(dialect = dialect.name(), url = %redact_url(&config.url), "Connecting to database...");

        let options = AnyPoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds));

        // 内存 SQLite 的数据绑定在连接上，连接一旦被回收数据就会丢失
        let options = if config.is_in_memory() {
            options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            options
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        };

        let pool = options.connect(&config.url).await?;

        info!(dialect = dialect.name(), "Database connection pool created");

        Ok(Self { pool, dialect })
    }

    /// 获取连接池引用
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// 当前方言
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// 健康检查
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(SharedError::from)
    }

    /// 关闭连接池
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::ops::Deref for Database {
    type Target = AnyPool;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}
