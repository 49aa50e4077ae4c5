//! 商品仓储

use erp_shared::database::{Dialect, Placeholders};
use sqlx::AnyPool;

use super::error::Result;
use super::{LIKE_ESCAPE, ListFilter, where_clause};
use crate::models::Product;

const PRODUCT_COLUMNS: &str =
    "id, name, description, sku, price, quantity, category, created_at, updated_at";

/// 商品仓储
#[derive(Clone)]
pub struct ProductRepository {
    pool: AnyPool,
    dialect: Dialect,
}

impl ProductRepository {
    pub fn new(pool: AnyPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    pub async fn create(&self, product: &Product) -> Result<()> {
        let sql = self.dialect.sql(
            r#"
            INSERT INTO products (id, name, description, sku, price, quantity, category, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        );

        sqlx::query(&sql)
            .bind(&product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(&product.sku)
            .bind(product.price)
            .bind(product.quantity)
            .bind(&product.category)
            .bind(product.created_at.to_db())
            .bind(product.updated_at.to_db())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let sql = self
            .dialect
            .sql(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
            .into_owned();

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// 全部商品，最新创建的在前
    pub async fn list_all(&self) -> Result<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC, id");

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// 分页查询
    ///
    /// `search` 在名称、描述、SKU 上做不区分大小写的子串匹配；
    /// `category` 按分类精确匹配（不区分大小写）。返回当前页和总数。
    pub async fn list_paginated(&self, filter: &ListFilter<'_>) -> Result<(Vec<Product>, i64)> {
        let mut params = Placeholders::new(self.dialect);
        let mut conditions = Vec::new();

        let pattern = filter.search_pattern();
        if pattern.is_some() {
            let p = params.next();
            conditions.push(format!(
                "(LOWER(name) LIKE LOWER({p}) {LIKE_ESCAPE} OR LOWER(COALESCE(description, '')) LIKE LOWER({p}) {LIKE_ESCAPE} OR LOWER(sku) LIKE LOWER({p}) {LIKE_ESCAPE})"
            ));
        }
        let category = filter.exact_value();
        if category.is_some() {
            let p = params.next();
            conditions.push(format!("LOWER(category) = LOWER({p})"));
        }
        let where_sql = where_clause(&conditions);

        let count_sql = format!("SELECT COUNT(*) FROM products{where_sql}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(pattern) = &pattern {
            count_query = count_query.bind(pattern);
        }
        if let Some(category) = category {
            count_query = count_query.bind(category);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let limit = params.next();
        let offset = params.next();
        let list_sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products{where_sql} ORDER BY created_at DESC, id LIMIT {limit} OFFSET {offset}"
        );
        let mut list_query = sqlx::query_as::<_, Product>(&list_sql);
        if let Some(pattern) = &pattern {
            list_query = list_query.bind(pattern);
        }
        if let Some(category) = category {
            list_query = list_query.bind(category);
        }
        let products = list_query
            .bind(filter.limit())
            .bind(filter.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((products, total))
    }

    /// 覆盖写入可变字段，返回是否命中记录
    pub async fn update(&self, product: &Product) -> Result<bool> {
        let sql = self.dialect.sql(
            r#"
            UPDATE products
            SET name = $1, description = $2, sku = $3, price = $4, quantity = $5, category = $6, updated_at = $7
            WHERE id = $8
            "#,
        );

        let result = sqlx::query(&sql)
            .bind(&product.name)
            .bind(&product.description)
            .bind(&product.sku)
            .bind(product.price)
            .bind(product.quantity)
            .bind(&product.category)
            .bind(product.updated_at.to_db())
            .bind(&product.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let sql = self.dialect.sql("DELETE FROM products WHERE id = $1");

        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
