//! 订单仓储
//!
//! 查询类方法直接使用连接池；写入类方法只在下单事务内调用，
//! 接收调用方持有的事务连接。

use erp_shared::database::Dialect;
use sqlx::{AnyConnection, AnyPool};

use super::error::Result;
use crate::models::{Customer, Order, OrderItem, Product};

/// 订单仓储
#[derive(Clone)]
pub struct OrderRepository {
    pool: AnyPool,
    dialect: Dialect,
}

impl OrderRepository {
    pub fn new(pool: AnyPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// 全部订单（附客户名称），最新的在前
    pub async fn list_with_customer(&self) -> Result<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT o.id, o.customer_id, o.total_amount, o.status, o.order_date,
                   c.name AS customer_name
            FROM orders o
            LEFT JOIN customers c ON o.customer_id = c.id
            ORDER BY o.order_date DESC, o.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    pub async fn exists(&self, order_id: &str) -> Result<bool> {
        let sql = self.dialect.sql("SELECT COUNT(*) FROM orders WHERE id = $1");

        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(order_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    /// 订单行（附商品名称）
    pub async fn list_items(&self, order_id: &str) -> Result<Vec<OrderItem>> {
        let sql = self.dialect.sql(
            r#"
            SELECT oi.id, oi.order_id, oi.product_id, oi.quantity, oi.unit_price, oi.total_price,
                   p.name AS product_name
            FROM order_items oi
            LEFT JOIN products p ON oi.product_id = p.id
            WHERE oi.order_id = $1
            ORDER BY p.name, oi.id
            "#,
        );

        let items = sqlx::query_as::<_, OrderItem>(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    pub async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    pub async fn count_items(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    // ---------------------------------------------------------------
    // 事务内操作
    // ---------------------------------------------------------------

    pub async fn find_customer(
        &self,
        conn: &mut AnyConnection,
        customer_id: &str,
    ) -> Result<Option<Customer>> {
        let sql = self.dialect.sql(
            "SELECT id, name, email, phone, address, created_at, updated_at FROM customers WHERE id = $1",
        );

        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(customer_id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(customer)
    }

    /// 读取商品并锁定该行（PostgreSQL 下 `FOR UPDATE`），直到事务结束
    pub async fn find_product(
        &self,
        conn: &mut AnyConnection,
        product_id: &str,
    ) -> Result<Option<Product>> {
        let sql = self
            .dialect
            .sql(&format!(
                "SELECT id, name, description, sku, price, quantity, category, created_at, updated_at \
                 FROM products WHERE id = $1{}",
                self.dialect.lock_for_update()
            ))
            .into_owned();

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(product)
    }

    pub async fn insert_order(&self, conn: &mut AnyConnection, order: &Order) -> Result<()> {
        let sql = self.dialect.sql(
            r#"
            INSERT INTO orders (id, customer_id, total_amount, status, order_date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        );

        sqlx::query(&sql)
            .bind(&order.id)
            .bind(&order.customer_id)
            .bind(order.total_amount)
            .bind(&order.status)
            .bind(order.order_date.to_db())
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    pub async fn insert_item(&self, conn: &mut AnyConnection, item: &OrderItem) -> Result<()> {
        let sql = self.dialect.sql(
            r#"
            INSERT INTO order_items (id, order_id, product_id, quantity, unit_price, total_price)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        );

        sqlx::query(&sql)
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.total_price)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// 扣减库存
    ///
    /// 仅当剩余数量足够时才更新，返回 false 表示库存不足
    pub async fn decrement_stock(
        &self,
        conn: &mut AnyConnection,
        product_id: &str,
        quantity: i64,
        updated_at: &str,
    ) -> Result<bool> {
        let sql = self.dialect.sql(
            r#"
            UPDATE products
            SET quantity = quantity - $1, updated_at = $2
            WHERE id = $3 AND quantity >= $1
            "#,
        );

        let result = sqlx::query(&sql)
            .bind(quantity)
            .bind(updated_at)
            .bind(product_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
