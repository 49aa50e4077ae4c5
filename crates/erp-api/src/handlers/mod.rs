//! HTTP 处理器模块
//!
//! 每个文件对应一组资源的接口，处理器负责解析与校验请求、
//! 调用仓储或服务，并把结果包装为响应信封。

pub mod customer;
pub mod inventory;
pub mod order;
pub mod product;
pub mod supplier;
pub mod system;
pub mod warehouse;

use axum::Json;
use axum::extract::Query;
use axum_extra::extract::WithRejection;
use serde::Serialize;
use serde_json::{Value, json};

use crate::dto::ApiResponse;
use crate::error::ApiError;

/// 解析失败时以校验错误返回的 JSON 请求体
pub type JsonBody<T> = WithRejection<Json<T>, ApiError>;

/// 解析失败时以校验错误返回的查询参数
pub type QueryParams<T> = WithRejection<Query<T>, ApiError>;

/// 更新接口的统一返回
///
/// 没有字段变化时原样返回记录
fn updated<T: Serialize>(
    entity: &str,
    record: &T,
    fields: Vec<&'static str>,
) -> ApiResponse<Value> {
    if fields.is_empty() {
        return ApiResponse::ok("No changes detected", json!(record));
    }

    let mut label = entity.to_string();
    if let Some(first) = label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }

    ApiResponse::ok(
        format!("{label} updated successfully"),
        json!({ entity: record, "updated_fields": fields }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updated_lists_changed_fields() {
        let response = updated("customer", &json!({ "id": "c1" }), vec!["email"]);
        assert_eq!(response.response_desc, "Customer updated successfully");

        let data = response.response_data.unwrap();
        assert_eq!(data["customer"]["id"], "c1");
        assert_eq!(data["updated_fields"], json!(["email"]));
    }

    #[test]
    fn test_updated_without_changes() {
        let response = updated("product", &json!({ "id": "p1" }), vec![]);
        assert_eq!(response.response_desc, "No changes detected");
        assert_eq!(response.response_data.unwrap()["id"], "p1");
    }
}
