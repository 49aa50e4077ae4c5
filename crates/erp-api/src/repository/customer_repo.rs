//! 客户仓储

use erp_shared::database::{Dialect, Placeholders};
use sqlx::AnyPool;

use super::error::Result;
use super::{LIKE_ESCAPE, ListFilter, where_clause};
use crate::models::Customer;

const CUSTOMER_COLUMNS: &str = "id, name, email, phone, address, created_at, updated_at";

/// 客户仓储
#[derive(Clone)]
pub struct CustomerRepository {
    pool: AnyPool,
    dialect: Dialect,
}

impl CustomerRepository {
    pub fn new(pool: AnyPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    pub async fn create(&self, customer: &Customer) -> Result<()> {
        let sql = self.dialect.sql(
            r#"
            INSERT INTO customers (id, name, email, phone, address, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        );

        sqlx::query(&sql)
            .bind(&customer.id)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.phone)
            .bind(&customer.address)
            .bind(customer.created_at.to_db())
            .bind(customer.updated_at.to_db())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Customer>> {
        let sql = self
            .dialect
            .sql(&format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"))
            .into_owned();

        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    pub async fn list_all(&self) -> Result<Vec<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY created_at DESC, id");

        let customers = sqlx::query_as::<_, Customer>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }

    /// 分页查询
    ///
    /// `search` 在名称、邮箱、电话上模糊匹配；`exact` 按邮箱精确匹配（不区分大小写）
    pub async fn list_paginated(&self, filter: &ListFilter<'_>) -> Result<(Vec<Customer>, i64)> {
        let mut params = Placeholders::new(self.dialect);
        let mut conditions = Vec::new();

        let pattern = filter.search_pattern();
        if pattern.is_some() {
            let p = params.next();
            conditions.push(format!(
                "(LOWER(name) LIKE LOWER({p}) {LIKE_ESCAPE} OR LOWER(email) LIKE LOWER({p}) {LIKE_ESCAPE} OR LOWER(COALESCE(phone, '')) LIKE LOWER({p}) {LIKE_ESCAPE})"
            ));
        }
        let email = filter.exact_value();
        if email.is_some() {
            let p = params.next();
            conditions.push(format!("LOWER(email) = LOWER({p})"));
        }
        let where_sql = where_clause(&conditions);

        let count_sql = format!("SELECT COUNT(*) FROM customers{where_sql}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(pattern) = &pattern {
            count_query = count_query.bind(pattern);
        }
        if let Some(email) = email {
            count_query = count_query.bind(email);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let limit = params.next();
        let offset = params.next();
        let list_sql = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers{where_sql} ORDER BY created_at DESC, id LIMIT {limit} OFFSET {offset}"
        );
        let mut list_query = sqlx::query_as::<_, Customer>(&list_sql);
        if let Some(pattern) = &pattern {
            list_query = list_query.bind(pattern);
        }
        if let Some(email) = email {
            list_query = list_query.bind(email);
        }
        let customers = list_query
            .bind(filter.limit())
            .bind(filter.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((customers, total))
    }

    pub async fn update(&self, customer: &Customer) -> Result<bool> {
        let sql = self.dialect.sql(
            r#"
            UPDATE customers
            SET name = $1, email = $2, phone = $3, address = $4, updated_at = $5
            WHERE id = $6
            "#,
        );

        let result = sqlx::query(&sql)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.phone)
            .bind(&customer.address)
            .bind(customer.updated_at.to_db())
            .bind(&customer.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 删除客户，其订单随外键级联删除
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let sql = self.dialect.sql("DELETE FROM customers WHERE id = $1");

        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
