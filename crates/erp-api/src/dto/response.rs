//! 响应 DTO 定义
//!
//! 所有接口都以 `{responseCode, responseDesc, responseData}` 信封返回

use axum::response::{IntoResponse, Response};
use axum::{Json, http::StatusCode};
use serde::Serialize;

use crate::models::{
    Customer, Inventory, InventorySummary, Order, OrderItem, Product, ProductSupplier, Supplier,
    Warehouse, WarehouseLocation,
};

/// 信封中的响应码
pub mod codes {
    use axum::http::StatusCode;

    pub const SUCCESS: &str = "00";
    pub const CREATED: &str = "01";
    pub const BAD_REQUEST: &str = "10";
    pub const NOT_FOUND: &str = "13";
    pub const VALIDATION: &str = "14";
    pub const DUPLICATE: &str = "15";
    pub const INTERNAL: &str = "99";

    /// 响应码对应的 HTTP 状态码
    pub fn status(code: &str) -> StatusCode {
        match code {
            SUCCESS => StatusCode::OK,
            CREATED => StatusCode::CREATED,
            BAD_REQUEST | VALIDATION | DUPLICATE => StatusCode::BAD_REQUEST,
            NOT_FOUND => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub response_code: &'static str,
    pub response_desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(code: &'static str, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            response_code: code,
            response_desc: message.into(),
            response_data: data,
        }
    }

    /// 200 成功响应
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(codes::SUCCESS, message, Some(data))
    }

    /// 201 创建成功响应
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(codes::CREATED, message, Some(data))
    }

    pub fn status(&self) -> StatusCode {
        codes::status(self.response_code)
    }
}

impl ApiResponse<()> {
    /// 200 成功响应（无数据）
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self::new(codes::SUCCESS, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// 分页信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    /// 总页数，结果为空时为 1
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, page_size: i64, total: i64) -> Self {
        let pages = if total == 0 {
            1
        } else {
            (total + page_size - 1) / page_size
        };

        Self {
            page,
            page_size,
            total,
            pages,
        }
    }
}

/// 商品分页列表
#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// 客户分页列表
#[derive(Debug, Serialize)]
pub struct CustomerPage {
    pub customers: Vec<Customer>,
    pub pagination: Pagination,
}

/// 下单结果中的订单头
#[derive(Debug, Serialize)]
pub struct OrderHeader {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub total_amount: f64,
    pub status: String,
    pub order_date: crate::models::Timestamp,
}

impl OrderHeader {
    pub fn new(order: &Order, customer_name: &str) -> Self {
        Self {
            id: order.id.clone(),
            customer_id: order.customer_id.clone(),
            customer_name: customer_name.to_string(),
            total_amount: order.total_amount,
            status: order.status.clone(),
            order_date: order.order_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderSummary {
    pub total_items: usize,
    pub total_amount: f64,
}

/// 下单响应
#[derive(Debug, Serialize)]
pub struct OrderCreated {
    pub order: OrderHeader,
    pub items: Vec<OrderItem>,
    pub summary: OrderSummary,
}

/// 订单行列表
#[derive(Debug, Serialize)]
pub struct OrderItems {
    pub order_id: String,
    pub items: Vec<OrderItem>,
    pub count: usize,
}

/// 供应商的商品列表
#[derive(Debug, Serialize)]
pub struct SupplierProducts {
    pub supplier: Supplier,
    pub products: Vec<ProductSupplier>,
    pub count: usize,
}

/// 商品的供应商列表
#[derive(Debug, Serialize)]
pub struct ProductSuppliers {
    pub product: Product,
    pub suppliers: Vec<ProductSupplier>,
    pub count: usize,
}

/// 仓库的库位列表
#[derive(Debug, Serialize)]
pub struct WarehouseLocations {
    pub warehouse: Warehouse,
    pub locations: Vec<WarehouseLocation>,
    pub count: usize,
}

/// 仓库库存及汇总
#[derive(Debug, Serialize)]
pub struct WarehouseInventory {
    pub warehouse: Warehouse,
    pub inventory: Vec<Inventory>,
    pub summary: InventorySummary,
}

/// 商品在各仓库的库存
#[derive(Debug, Serialize)]
pub struct ProductInventory {
    pub product: Product,
    pub inventory: Vec<Inventory>,
    pub summary: InventorySummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_pages() {
        assert_eq!(Pagination::new(1, 10, 0).pages, 1);
        assert_eq!(Pagination::new(1, 10, 10).pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).pages, 2);
        assert_eq!(Pagination::new(3, 25, 100).pages, 4);
    }

    #[test]
    fn test_envelope_field_names() {
        let body = serde_json::to_value(ApiResponse::ok("done", 5)).unwrap();
        assert_eq!(body["responseCode"], "00");
        assert_eq!(body["responseDesc"], "done");
        assert_eq!(body["responseData"], 5);

        let empty = serde_json::to_value(ApiResponse::ok_empty("gone")).unwrap();
        assert!(empty.get("responseData").is_none());
    }

    #[test]
    fn test_status_follows_code() {
        assert_eq!(ApiResponse::ok("", ()).status(), StatusCode::OK);
        assert_eq!(ApiResponse::created("", ()).status(), StatusCode::CREATED);
        assert_eq!(codes::status(codes::DUPLICATE), StatusCode::BAD_REQUEST);
        assert_eq!(codes::status(codes::NOT_FOUND), StatusCode::NOT_FOUND);
        assert_eq!(codes::status(codes::INTERNAL), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
