use serde::{Deserialize, Serialize};

use super::Timestamp;

/// 新订单的初始状态
pub const ORDER_STATUS_PENDING: &str = "pending";

/// 订单头
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub total_amount: f64,
    pub status: String,
    pub order_date: Timestamp,
    /// 关联查询时填充
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

impl Order {
    pub fn new(customer_id: String, total_amount: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            customer_id,
            total_amount,
            status: ORDER_STATUS_PENDING.to_string(),
            order_date: Timestamp::now(),
            customer_name: None,
        }
    }
}

/// 订单行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
    /// 关联查询时填充
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}
