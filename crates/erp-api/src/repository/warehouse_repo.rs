//! 仓库仓储
//!
//! 覆盖仓库、库位与库存三张表。库存读取时通过 JOIN 带出商品、
//! 仓库与库位的展示字段，并计算 `available_quantity`。

use erp_shared::database::Dialect;
use sqlx::AnyPool;

use super::error::Result;
use crate::models::{Inventory, Timestamp, Warehouse, WarehouseLocation};

const WAREHOUSE_COLUMNS: &str =
    "id, code, name, location, manager_name, phone, email, capacity, status, created_at, updated_at";

const LOCATION_SELECT: &str = r#"
    SELECT wl.id, wl.warehouse_id, wl.location_code, wl.location_name, wl.zone,
           wl.row_number, wl.shelf_number, wl.max_capacity, wl.current_quantity,
           wl.status, wl.created_at, wl.updated_at, w.name AS warehouse_name
    FROM warehouse_locations wl
    JOIN warehouses w ON wl.warehouse_id = w.id
"#;

const LOCATION_ORDER: &str = " ORDER BY wl.zone, wl.row_number, wl.shelf_number, wl.location_code";

const INVENTORY_SELECT: &str = r#"
    SELECT i.id, i.product_id, i.warehouse_id, i.location_id, i.quantity,
           i.reserved_quantity, i.quantity - i.reserved_quantity AS available_quantity,
           i.min_quantity, i.max_quantity, i.last_restocked, i.last_checked,
           i.created_at, i.updated_at,
           p.name AS product_name, p.sku, w.name AS warehouse_name, wl.location_code
    FROM inventory i
    JOIN products p ON i.product_id = p.id
    JOIN warehouses w ON i.warehouse_id = w.id
    LEFT JOIN warehouse_locations wl ON i.location_id = wl.id
"#;

/// 仓库仓储
#[derive(Clone)]
pub struct WarehouseRepository {
    pool: AnyPool,
    dialect: Dialect,
}

impl WarehouseRepository {
    pub fn new(pool: AnyPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    pub async fn create(&self, warehouse: &Warehouse) -> Result<()> {
        let sql = self.dialect.sql(
            r#"
            INSERT INTO warehouses (id, code, name, location, manager_name, phone, email,
                                    capacity, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        );

        sqlx::query(&sql)
            .bind(&warehouse.id)
            .bind(&warehouse.code)
            .bind(&warehouse.name)
            .bind(&warehouse.location)
            .bind(&warehouse.manager_name)
            .bind(&warehouse.phone)
            .bind(&warehouse.email)
            .bind(warehouse.capacity)
            .bind(&warehouse.status)
            .bind(warehouse.created_at.to_db())
            .bind(warehouse.updated_at.to_db())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Warehouse>> {
        let sql = self
            .dialect
            .sql(&format!("SELECT {WAREHOUSE_COLUMNS} FROM warehouses WHERE id = $1"))
            .into_owned();

        let warehouse = sqlx::query_as::<_, Warehouse>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(warehouse)
    }

    pub async fn list_all(&self) -> Result<Vec<Warehouse>> {
        let sql = format!("SELECT {WAREHOUSE_COLUMNS} FROM warehouses ORDER BY name, id");

        let warehouses = sqlx::query_as::<_, Warehouse>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(warehouses)
    }

    pub async fn update(&self, warehouse: &Warehouse) -> Result<bool> {
        let sql = self.dialect.sql(
            r#"
            UPDATE warehouses
            SET code = $1, name = $2, location = $3, manager_name = $4, phone = $5,
                email = $6, capacity = $7, status = $8, updated_at = $9
            WHERE id = $10
            "#,
        );

        let result = sqlx::query(&sql)
            .bind(&warehouse.code)
            .bind(&warehouse.name)
            .bind(&warehouse.location)
            .bind(&warehouse.manager_name)
            .bind(&warehouse.phone)
            .bind(&warehouse.email)
            .bind(warehouse.capacity)
            .bind(&warehouse.status)
            .bind(warehouse.updated_at.to_db())
            .bind(&warehouse.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 删除仓库，库位与库存随外键级联删除
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let sql = self.dialect.sql("DELETE FROM warehouses WHERE id = $1");

        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM warehouses")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    // ---------------------------------------------------------------
    // 库位
    // ---------------------------------------------------------------

    pub async fn create_location(&self, location: &WarehouseLocation) -> Result<()> {
        let sql = self.dialect.sql(
            r#"
            INSERT INTO warehouse_locations (id, warehouse_id, location_code, location_name, zone,
                                             row_number, shelf_number, max_capacity, current_quantity,
                                             status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        );

        sqlx::query(&sql)
            .bind(&location.id)
            .bind(&location.warehouse_id)
            .bind(&location.location_code)
            .bind(&location.location_name)
            .bind(&location.zone)
            .bind(location.row_number)
            .bind(location.shelf_number)
            .bind(location.max_capacity)
            .bind(location.current_quantity)
            .bind(&location.status)
            .bind(location.created_at.to_db())
            .bind(location.updated_at.to_db())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn find_location(&self, location_id: &str) -> Result<Option<WarehouseLocation>> {
        let sql = self
            .dialect
            .sql(&format!("{LOCATION_SELECT} WHERE wl.id = $1"))
            .into_owned();

        let location = sqlx::query_as::<_, WarehouseLocation>(&sql)
            .bind(location_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(location)
    }

    /// 仓库下全部库位，按区域、排、架排序
    pub async fn list_locations(&self, warehouse_id: &str) -> Result<Vec<WarehouseLocation>> {
        let sql = self
            .dialect
            .sql(&format!(
                "{LOCATION_SELECT} WHERE wl.warehouse_id = $1{LOCATION_ORDER}"
            ))
            .into_owned();

        let locations = sqlx::query_as::<_, WarehouseLocation>(&sql)
            .bind(warehouse_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(locations)
    }

    /// 状态为 available 且未满（或不限容量）的库位
    pub async fn list_available_locations(
        &self,
        warehouse_id: &str,
    ) -> Result<Vec<WarehouseLocation>> {
        let sql = self
            .dialect
            .sql(&format!(
                "{LOCATION_SELECT} WHERE wl.warehouse_id = $1 AND wl.status = 'available' \
                 AND (wl.max_capacity IS NULL OR wl.current_quantity < wl.max_capacity){LOCATION_ORDER}"
            ))
            .into_owned();

        let locations = sqlx::query_as::<_, WarehouseLocation>(&sql)
            .bind(warehouse_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(locations)
    }

    pub async fn update_location(&self, location: &WarehouseLocation) -> Result<bool> {
        let sql = self.dialect.sql(
            r#"
            UPDATE warehouse_locations
            SET location_code = $1, location_name = $2, zone = $3, row_number = $4,
                shelf_number = $5, max_capacity = $6, current_quantity = $7, status = $8,
                updated_at = $9
            WHERE id = $10
            "#,
        );

        let result = sqlx::query(&sql)
            .bind(&location.location_code)
            .bind(&location.location_name)
            .bind(&location.zone)
            .bind(location.row_number)
            .bind(location.shelf_number)
            .bind(location.max_capacity)
            .bind(location.current_quantity)
            .bind(&location.status)
            .bind(location.updated_at.to_db())
            .bind(&location.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_locations(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM warehouse_locations")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    // ---------------------------------------------------------------
    // 库存
    // ---------------------------------------------------------------

    pub async fn create_inventory(&self, inventory: &Inventory) -> Result<()> {
        let sql = self.dialect.sql(
            r#"
            INSERT INTO inventory (id, product_id, warehouse_id, location_id, quantity,
                                   reserved_quantity, min_quantity, max_quantity,
                                   last_restocked, last_checked, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        );

        sqlx::query(&sql)
            .bind(&inventory.id)
            .bind(&inventory.product_id)
            .bind(&inventory.warehouse_id)
            .bind(&inventory.location_id)
            .bind(inventory.quantity)
            .bind(inventory.reserved_quantity)
            .bind(inventory.min_quantity)
            .bind(inventory.max_quantity)
            .bind(inventory.last_restocked.as_ref().map(Timestamp::to_db))
            .bind(inventory.last_checked.as_ref().map(Timestamp::to_db))
            .bind(inventory.created_at.to_db())
            .bind(inventory.updated_at.to_db())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn find_inventory(&self, inventory_id: &str) -> Result<Option<Inventory>> {
        let sql = self
            .dialect
            .sql(&format!("{INVENTORY_SELECT} WHERE i.id = $1"))
            .into_owned();

        let inventory = sqlx::query_as::<_, Inventory>(&sql)
            .bind(inventory_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(inventory)
    }

    /// 仓库内的库存，按商品名称排序
    pub async fn list_inventory_by_warehouse(&self, warehouse_id: &str) -> Result<Vec<Inventory>> {
        let sql = self
            .dialect
            .sql(&format!(
                "{INVENTORY_SELECT} WHERE i.warehouse_id = $1 ORDER BY p.name, i.id"
            ))
            .into_owned();

        let records = sqlx::query_as::<_, Inventory>(&sql)
            .bind(warehouse_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// 商品在各仓库的库存，按仓库名称排序
    pub async fn list_inventory_by_product(&self, product_id: &str) -> Result<Vec<Inventory>> {
        let sql = self
            .dialect
            .sql(&format!(
                "{INVENTORY_SELECT} WHERE i.product_id = $1 ORDER BY w.name, i.id"
            ))
            .into_owned();

        let records = sqlx::query_as::<_, Inventory>(&sql)
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    pub async fn update_inventory(&self, inventory: &Inventory) -> Result<bool> {
        let sql = self.dialect.sql(
            r#"
            UPDATE inventory
            SET quantity = $1, reserved_quantity = $2, min_quantity = $3, max_quantity = $4,
                last_restocked = $5, last_checked = $6, updated_at = $7
            WHERE id = $8
            "#,
        );

        let result = sqlx::query(&sql)
            .bind(inventory.quantity)
            .bind(inventory.reserved_quantity)
            .bind(inventory.min_quantity)
            .bind(inventory.max_quantity)
            .bind(inventory.last_restocked.as_ref().map(Timestamp::to_db))
            .bind(inventory.last_checked.as_ref().map(Timestamp::to_db))
            .bind(inventory.updated_at.to_db())
            .bind(&inventory.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_inventory(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM inventory")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
