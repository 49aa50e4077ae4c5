//! 数据传输对象
//!
//! 请求体的反序列化与校验、响应信封及各接口的返回结构

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
