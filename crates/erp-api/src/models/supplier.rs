use serde::{Deserialize, Serialize};

use super::{STATUS_ACTIVE, Timestamp};

/// 供应商
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    /// 供应商编码，全局唯一
    pub code: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub payment_terms: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Supplier {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        code: String,
        contact_person: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        tax_id: Option<String>,
        payment_terms: Option<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            code,
            contact_person,
            email,
            phone,
            address,
            tax_id,
            payment_terms,
            status: STATUS_ACTIVE.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// 商品与供应商的关联
///
/// 同一商品对同一供应商只能有一条记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSupplier {
    pub id: String,
    pub product_id: String,
    pub supplier_id: String,
    pub supplier_sku: Option<String>,
    pub cost_price: Option<f64>,
    pub lead_time_days: Option<i64>,
    /// 是否为首选供应商
    pub is_primary: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_code: Option<String>,
}

impl ProductSupplier {
    pub fn new(
        product_id: String,
        supplier_id: String,
        supplier_sku: Option<String>,
        cost_price: Option<f64>,
        lead_time_days: Option<i64>,
        is_primary: bool,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            product_id,
            supplier_id,
            supplier_sku,
            cost_price,
            lead_time_days,
            is_primary,
            created_at: now,
            updated_at: now,
            product_name: None,
            product_sku: None,
            supplier_name: None,
            supplier_code: None,
        }
    }
}

/// 关联记录的数据库行
///
/// is_primary 在两种方言下都以 0/1 整数存储
#[derive(Debug, sqlx::FromRow)]
pub struct ProductSupplierRow {
    pub id: String,
    pub product_id: String,
    pub supplier_id: String,
    pub supplier_sku: Option<String>,
    pub cost_price: Option<f64>,
    pub lead_time_days: Option<i64>,
    pub is_primary: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(default)]
    pub product_name: Option<String>,
    #[sqlx(default)]
    pub product_sku: Option<String>,
    #[sqlx(default)]
    pub supplier_name: Option<String>,
    #[sqlx(default)]
    pub supplier_code: Option<String>,
}

impl From<ProductSupplierRow> for ProductSupplier {
    fn from(row: ProductSupplierRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            supplier_id: row.supplier_id,
            supplier_sku: row.supplier_sku,
            cost_price: row.cost_price,
            lead_time_days: row.lead_time_days,
            is_primary: row.is_primary != 0,
            created_at: row.created_at,
            updated_at: row.updated_at,
            product_name: row.product_name,
            product_sku: row.product_sku,
            supplier_name: row.supplier_name,
            supplier_code: row.supplier_code,
        }
    }
}
