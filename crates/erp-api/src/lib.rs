//! ERP 记录管理服务
//!
//! 提供商品、客户、订单、供应商、仓库与库存的 REST API。
//!
//! ## 模块结构
//!
//! - `models`: 实体模型
//! - `repository`: 各实体的数据访问，按方言生成占位符
//! - `service`: 下单事务
//! - `dto`: 请求校验与响应信封
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//! - `schema`: 启动时建表
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据库：sqlx Any 驱动（PostgreSQL / SQLite）
//! - 数据验证：validator

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;

use axum::{Router, middleware as axum_middleware};
use erp_shared::config::AppConfig;
use erp_shared::observability::middleware as obs_middleware;
use tower_http::catch_panic::CatchPanicLayer;

pub use error::{ApiError, Result};
pub use state::AppState;

/// 组装完整的应用路由与中间件
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(routes::system_routes())
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::custom(middleware::panic_handler(
            config.is_development(),
        )))
        .layer(axum_middleware::from_fn(middleware::request_logger))
        .layer(middleware::cors_layer(&config.cors))
        // 可观测性中间件：请求追踪和指标收集
        .layer(axum_middleware::from_fn(obs_middleware::http_tracing))
        .layer(axum_middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}
