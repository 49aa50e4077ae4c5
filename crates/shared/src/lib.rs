//! 共享库
//!
//! 包含配置加载、数据库连接与方言、错误处理、可观测性等基础设施代码。

pub mod config;
pub mod database;
pub mod error;
pub mod observability;
