//! 中间件模块
//!
//! 请求日志、panic 恢复与 CORS

mod cors;
mod recovery;
mod request_logger;

pub use cors::cors_layer;
pub use recovery::panic_handler;
pub use request_logger::request_logger;
