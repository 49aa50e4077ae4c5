use serde::{Deserialize, Serialize};

use super::{LOCATION_AVAILABLE, STATUS_ACTIVE, Timestamp};

/// 仓库
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Warehouse {
    pub id: String,
    /// 仓库编码，全局唯一
    pub code: String,
    pub name: String,
    pub location: Option<String>,
    pub manager_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub capacity: Option<i64>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Warehouse {
    pub fn new(
        code: String,
        name: String,
        location: Option<String>,
        manager_name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        capacity: Option<i64>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            code,
            name,
            location,
            manager_name,
            phone,
            email,
            capacity,
            status: STATUS_ACTIVE.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// 库位
///
/// 库位编码在所属仓库内唯一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WarehouseLocation {
    pub id: String,
    pub warehouse_id: String,
    pub location_code: String,
    pub location_name: Option<String>,
    pub zone: Option<String>,
    pub row_number: Option<i64>,
    pub shelf_number: Option<i64>,
    /// 为空表示不限容量
    pub max_capacity: Option<i64>,
    pub current_quantity: i64,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_name: Option<String>,
}

impl WarehouseLocation {
    pub fn new(
        warehouse_id: String,
        location_code: String,
        location_name: Option<String>,
        zone: Option<String>,
        row_number: Option<i64>,
        shelf_number: Option<i64>,
        max_capacity: Option<i64>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            warehouse_id,
            location_code,
            location_name,
            zone,
            row_number,
            shelf_number,
            max_capacity,
            current_quantity: 0,
            status: LOCATION_AVAILABLE.to_string(),
            created_at: now,
            updated_at: now,
            warehouse_name: None,
        }
    }

    /// 是否还能放入货物
    pub fn has_free_capacity(&self) -> bool {
        self.status == LOCATION_AVAILABLE
            && self.max_capacity.is_none_or(|max| self.current_quantity < max)
    }
}

/// 库存记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Inventory {
    pub id: String,
    pub product_id: String,
    pub warehouse_id: String,
    pub location_id: Option<String>,
    pub quantity: i64,
    /// 已被占用的数量
    pub reserved_quantity: i64,
    /// quantity - reserved_quantity，读取时计算
    pub available_quantity: i64,
    pub min_quantity: i64,
    pub max_quantity: Option<i64>,
    pub last_restocked: Option<Timestamp>,
    pub last_checked: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_name: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_code: Option<String>,
}

impl Inventory {
    pub fn new(
        product_id: String,
        warehouse_id: String,
        location_id: Option<String>,
        quantity: i64,
        min_quantity: i64,
        max_quantity: Option<i64>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            product_id,
            warehouse_id,
            location_id,
            quantity,
            reserved_quantity: 0,
            available_quantity: quantity,
            min_quantity,
            max_quantity,
            last_restocked: (quantity > 0).then_some(now),
            last_checked: None,
            created_at: now,
            updated_at: now,
            product_name: None,
            sku: None,
            warehouse_name: None,
            location_code: None,
        }
    }

    /// 是否低于预警值
    pub fn is_below_minimum(&self) -> bool {
        self.available_quantity < self.min_quantity
    }
}

/// 仓库库存汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_items: usize,
    pub total_quantity: i64,
    pub total_reserved: i64,
    pub total_available: i64,
    /// 低于预警值的记录数
    pub low_stock_items: usize,
}

impl InventorySummary {
    pub fn from_records(records: &[Inventory]) -> Self {
        records.iter().fold(
            Self {
                total_items: records.len(),
                ..Default::default()
            },
            |mut acc, inv| {
                acc.total_quantity += inv.quantity;
                acc.total_reserved += inv.reserved_quantity;
                acc.total_available += inv.available_quantity;
                if inv.is_below_minimum() {
                    acc.low_stock_items += 1;
                }
                acc
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_capacity() {
        let mut location = WarehouseLocation::new(
            "w1".into(),
            "A-01".into(),
            None,
            Some("A".into()),
            Some(1),
            Some(1),
            Some(10),
        );
        assert!(location.has_free_capacity());

        location.current_quantity = 10;
        assert!(!location.has_free_capacity());

        location.max_capacity = None;
        assert!(location.has_free_capacity());

        location.status = "maintenance".into();
        assert!(!location.has_free_capacity());
    }

    #[test]
    fn test_inventory_summary() {
        let mut first = Inventory::new("p1".into(), "w1".into(), None, 50, 10, None);
        first.reserved_quantity = 5;
        first.available_quantity = 45;
        let second = Inventory::new("p2".into(), "w1".into(), None, 3, 10, None);

        let summary = InventorySummary::from_records(&[first, second]);
        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.total_quantity, 53);
        assert_eq!(summary.total_reserved, 5);
        assert_eq!(summary.total_available, 48);
        assert_eq!(summary.low_stock_items, 1);
    }

    #[test]
    fn test_empty_inventory_summary() {
        assert_eq!(InventorySummary::from_records(&[]), InventorySummary::default());
    }
}
