//! CORS 配置

use axum::http::{HeaderName, HeaderValue, Method, header};
use erp_shared::config::CorsConfig;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

const ALLOWED_HEADERS: [HeaderName; 3] = [header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION];

/// 按配置构建 CORS 层
///
/// `allowed_origins` 为 `*` 时允许任意来源，否则为逗号分隔的来源列表
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = config.allowed_origins.trim();

    let allow_origin = if origins == "*" {
        AllowOrigin::any()
    } else {
        let list: Vec<HeaderValue> = origins
            .split(',')
            .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
            .collect();
        AllowOrigin::list(list)
    };

    info!(allowed_origins = %origins, "CORS configured");

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(ALLOWED_HEADERS)
        .expose_headers([header::CONTENT_LENGTH])
}
