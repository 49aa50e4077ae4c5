//! panic 恢复
//!
//! handler 内的 panic 转换为 99 响应信封，开发环境下附带 panic 信息

use std::any::Any;

use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::dto::{ApiResponse, codes};

/// 生成 `CatchPanicLayer::custom` 使用的处理函数
pub fn panic_handler(
    expose_details: bool,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static {
    move |panic| {
        let detail = panic_message(panic.as_ref());
        error!(panic = %detail, "Handler panicked");

        let data = expose_details.then(|| json!({ "panic": detail }));
        ApiResponse::new(codes::INTERNAL, "Internal server error", data).into_response()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    }
}
