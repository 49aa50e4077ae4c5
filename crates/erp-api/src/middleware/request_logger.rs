//! 请求日志中间件
//!
//! 记录请求方法、路径、请求体、状态码与耗时；错误响应额外记录响应体。
//! 健康检查请求不记录。

use std::time::Instant;

use axum::{
    body::{Body, Bytes, to_bytes},
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::error::ApiError;

/// 缓冲请求体与错误响应体的上限
const MAX_LOGGED_BODY: usize = 2 * 1024 * 1024;

/// 日志中请求体的最大字符数
const BODY_PREVIEW_CHARS: usize = 1024;

pub async fn request_logger(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if path == "/health" {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let query = request.uri().query().map(str::to_string);
    let started = Instant::now();

    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(method = %method, path = %path, error = %err, "Failed to read request body");
            return ApiError::Malformed("Request body is too large or unreadable".to_string())
                .into_response();
        }
    };

    info!(
        method = %method,
        path = %path,
        query = query.as_deref().unwrap_or(""),
        body = %preview(&bytes),
        "Request received"
    );

    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;
    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;

    if !status.is_client_error() && !status.is_server_error() {
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms,
            "Request completed"
        );
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, MAX_LOGGED_BODY).await.unwrap_or_default();

    warn!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        latency_ms,
        response = %preview(&bytes),
        "Request failed"
    );

    Response::from_parts(parts, Body::from(bytes))
}

/// 截断后的 UTF-8 文本，用于日志
fn preview(bytes: &Bytes) -> String {
    let text = String::from_utf8_lossy(bytes);
    if text.chars().count() <= BODY_PREVIEW_CHARS {
        return text.into_owned();
    }

    let mut truncated: String = text.chars().take(BODY_PREVIEW_CHARS).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_bodies() {
        let long = Bytes::from("x".repeat(BODY_PREVIEW_CHARS + 10));
        let text = preview(&long);
        assert_eq!(text.chars().count(), BODY_PREVIEW_CHARS + 3);
        assert!(text.ends_with("..."));
    }

    #[test]
    fn test_preview_keeps_short_bodies() {
        assert_eq!(preview(&Bytes::from_static(b"{\"a\":1}")), "{\"a\":1}");
    }
}
