use serde::{Deserialize, Serialize};

use super::Timestamp;

/// 客户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: String,
    pub name: String,
    /// 邮箱，全局唯一
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Customer {
    pub fn new(name: String, email: String, phone: Option<String>, address: Option<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
            phone,
            address,
            created_at: now,
            updated_at: now,
        }
    }
}
