//! 数据库表结构
//!
//! 启动时以 `CREATE TABLE IF NOT EXISTS` 幂等建表。列类型按方言选择，
//! 时间戳统一存为 RFC 3339 文本。

use erp_shared::database::{Database, Dialect};
use tracing::info;

/// 按依赖顺序排列的建表语句
pub fn statements(dialect: Dialect) -> Vec<String> {
    let key = dialect.key_type();
    let int = dialect.integer_type();
    let real = dialect.real_type();

    vec![
        format!(
            r#"CREATE TABLE IF NOT EXISTS products (
                id {key} PRIMARY KEY,
                name {key} NOT NULL,
                description TEXT,
                sku {key} UNIQUE NOT NULL,
                price {real} NOT NULL,
                quantity {int} NOT NULL,
                category {key},
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )"#
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS customers (
                id {key} PRIMARY KEY,
                name {key} NOT NULL,
                email {key} UNIQUE NOT NULL,
                phone {key},
                address TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )"#
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS orders (
                id {key} PRIMARY KEY,
                customer_id {key} NOT NULL,
                total_amount {real} NOT NULL,
                status {key} NOT NULL DEFAULT 'pending',
                order_date TEXT NOT NULL,
                FOREIGN KEY (customer_id) REFERENCES customers(id) ON DELETE CASCADE
            )"#
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS order_items (
                id {key} PRIMARY KEY,
                order_id {key} NOT NULL,
                product_id {key} NOT NULL,
                quantity {int} NOT NULL,
                unit_price {real} NOT NULL,
                total_price {real} NOT NULL,
                FOREIGN KEY (order_id) REFERENCES orders(id) ON DELETE CASCADE,
                FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE
            )"#
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS suppliers (
                id {key} PRIMARY KEY,
                name {key} NOT NULL,
                code {key} UNIQUE NOT NULL,
                contact_person {key},
                email {key},
                phone {key},
                address TEXT,
                tax_id {key},
                payment_terms TEXT,
                status {key} NOT NULL DEFAULT 'active',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )"#
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS product_suppliers (
                id {key} PRIMARY KEY,
                product_id {key} NOT NULL,
                supplier_id {key} NOT NULL,
                supplier_sku {key},
                cost_price {real},
                lead_time_days {int},
                is_primary {int} NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE,
                FOREIGN KEY (supplier_id) REFERENCES suppliers(id) ON DELETE CASCADE,
                UNIQUE (product_id, supplier_id)
            )"#
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS warehouses (
                id {key} PRIMARY KEY,
                code {key} UNIQUE NOT NULL,
                name {key} NOT NULL,
                location TEXT,
                manager_name {key},
                phone {key},
                email {key},
                capacity {int},
                status {key} NOT NULL DEFAULT 'active',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )"#
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS warehouse_locations (
                id {key} PRIMARY KEY,
                warehouse_id {key} NOT NULL,
                location_code {key} NOT NULL,
                location_name {key},
                zone {key},
                row_number {int},
                shelf_number {int},
                max_capacity {int},
                current_quantity {int} NOT NULL DEFAULT 0,
                status {key} NOT NULL DEFAULT 'available',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (warehouse_id) REFERENCES warehouses(id) ON DELETE CASCADE,
                UNIQUE (warehouse_id, location_code)
            )"#
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS inventory (
                id {key} PRIMARY KEY,
                product_id {key} NOT NULL,
                warehouse_id {key} NOT NULL,
                location_id {key},
                quantity {int} NOT NULL DEFAULT 0,
                reserved_quantity {int} NOT NULL DEFAULT 0,
                min_quantity {int} NOT NULL DEFAULT 0,
                max_quantity {int},
                last_restocked TEXT,
                last_checked TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE,
                FOREIGN KEY (warehouse_id) REFERENCES warehouses(id) ON DELETE CASCADE,
                FOREIGN KEY (location_id) REFERENCES warehouse_locations(id) ON DELETE SET NULL,
                UNIQUE (product_id, warehouse_id, location_id)
            )"#
        ),
    ]
}

/// 建表
pub async fn initialize(db: &Database) -> sqlx::Result<()> {
    for statement in statements(db.dialect()) {
        sqlx::query(&statement).execute(db.pool()).await?;
    }

    info!(dialect = db.dialect().name(), "Database schema ready");
    Ok(())
}
