//! 仓储层错误

use thiserror::Error;

/// 仓储错误
///
/// 约束冲突按数据库返回的错误类别识别，不依赖错误文本
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("唯一约束冲突: {0}")]
    Duplicate(String),

    #[error("外键约束冲突: {0}")]
    ForeignKey(String),

    #[error("数据库错误: {0}")]
    Database(sqlx::Error),
}

pub type Result<T> = std::result::Result<T, RepoError>;

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return Self::Duplicate(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return Self::ForeignKey(db_err.message().to_string());
            }
        }
        Self::Database(err)
    }
}

impl RepoError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}
