use serde::{Deserialize, Serialize};

use super::Timestamp;

/// 商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// 库存单位编码，全局唯一
    pub sku: String,
    pub price: f64,
    /// 当前可售库存
    pub quantity: i64,
    pub category: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    pub fn new(
        name: String,
        description: Option<String>,
        sku: String,
        price: f64,
        quantity: i64,
        category: Option<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description,
            sku,
            price,
            quantity,
            category,
            created_at: now,
            updated_at: now,
        }
    }
}
