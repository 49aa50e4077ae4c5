//! 供应商仓储，包含商品-供应商关联

use erp_shared::database::Dialect;
use sqlx::AnyPool;

use super::error::Result;
use crate::models::{ProductSupplier, ProductSupplierRow, Supplier};

const SUPPLIER_COLUMNS: &str = "id, name, code, contact_person, email, phone, address, tax_id, \
     payment_terms, status, created_at, updated_at";

const LINK_SELECT: &str = r#"
    SELECT ps.id, ps.product_id, ps.supplier_id, ps.supplier_sku, ps.cost_price,
           ps.lead_time_days, ps.is_primary, ps.created_at, ps.updated_at,
           p.name AS product_name, p.sku AS product_sku,
           s.name AS supplier_name, s.code AS supplier_code
    FROM product_suppliers ps
    JOIN products p ON ps.product_id = p.id
    JOIN suppliers s ON ps.supplier_id = s.id
"#;

/// 供应商仓储
#[derive(Clone)]
pub struct SupplierRepository {
    pool: AnyPool,
    dialect: Dialect,
}

impl SupplierRepository {
    pub fn new(pool: AnyPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    pub async fn create(&self, supplier: &Supplier) -> Result<()> {
        let sql = self.dialect.sql(
            r#"
            INSERT INTO suppliers (id, name, code, contact_person, email, phone, address,
                                   tax_id, payment_terms, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        );

        sqlx::query(&sql)
            .bind(&supplier.id)
            .bind(&supplier.name)
            .bind(&supplier.code)
            .bind(&supplier.contact_person)
            .bind(&supplier.email)
            .bind(&supplier.phone)
            .bind(&supplier.address)
            .bind(&supplier.tax_id)
            .bind(&supplier.payment_terms)
            .bind(&supplier.status)
            .bind(supplier.created_at.to_db())
            .bind(supplier.updated_at.to_db())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Supplier>> {
        let sql = self
            .dialect
            .sql(&format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = $1"))
            .into_owned();

        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(supplier)
    }

    pub async fn list_all(&self) -> Result<Vec<Supplier>> {
        let sql = format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers ORDER BY name, id");

        let suppliers = sqlx::query_as::<_, Supplier>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(suppliers)
    }

    pub async fn update(&self, supplier: &Supplier) -> Result<bool> {
        let sql = self.dialect.sql(
            r#"
            UPDATE suppliers
            SET name = $1, code = $2, contact_person = $3, email = $4, phone = $5,
                address = $6, tax_id = $7, payment_terms = $8, status = $9, updated_at = $10
            WHERE id = $11
            "#,
        );

        let result = sqlx::query(&sql)
            .bind(&supplier.name)
            .bind(&supplier.code)
            .bind(&supplier.contact_person)
            .bind(&supplier.email)
            .bind(&supplier.phone)
            .bind(&supplier.address)
            .bind(&supplier.tax_id)
            .bind(&supplier.payment_terms)
            .bind(&supplier.status)
            .bind(supplier.updated_at.to_db())
            .bind(&supplier.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 删除供应商，关联记录随外键级联删除
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let sql = self.dialect.sql("DELETE FROM suppliers WHERE id = $1");

        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM suppliers")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    // ---------------------------------------------------------------
    // 商品-供应商关联
    // ---------------------------------------------------------------

    pub async fn add_product_link(&self, link: &ProductSupplier) -> Result<()> {
        let sql = self.dialect.sql(
            r#"
            INSERT INTO product_suppliers (id, product_id, supplier_id, supplier_sku, cost_price,
                                           lead_time_days, is_primary, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        );

        sqlx::query(&sql)
            .bind(&link.id)
            .bind(&link.product_id)
            .bind(&link.supplier_id)
            .bind(&link.supplier_sku)
            .bind(link.cost_price)
            .bind(link.lead_time_days)
            .bind(i64::from(link.is_primary))
            .bind(link.created_at.to_db())
            .bind(link.updated_at.to_db())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn find_product_link(&self, link_id: &str) -> Result<Option<ProductSupplier>> {
        let sql = self
            .dialect
            .sql(&format!("{LINK_SELECT} WHERE ps.id = $1"))
            .into_owned();

        let row = sqlx::query_as::<_, ProductSupplierRow>(&sql)
            .bind(link_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// 供应商供应的商品，按商品名称排序
    pub async fn list_products_for_supplier(
        &self,
        supplier_id: &str,
    ) -> Result<Vec<ProductSupplier>> {
        let sql = self
            .dialect
            .sql(&format!(
                "{LINK_SELECT} WHERE ps.supplier_id = $1 ORDER BY p.name, ps.id"
            ))
            .into_owned();

        let rows = sqlx::query_as::<_, ProductSupplierRow>(&sql)
            .bind(supplier_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 商品的供应商，首选供应商在前，其余按名称排序
    pub async fn list_suppliers_for_product(
        &self,
        product_id: &str,
    ) -> Result<Vec<ProductSupplier>> {
        let sql = self
            .dialect
            .sql(&format!(
                "{LINK_SELECT} WHERE ps.product_id = $1 ORDER BY ps.is_primary DESC, s.name, ps.id"
            ))
            .into_owned();

        let rows = sqlx::query_as::<_, ProductSupplierRow>(&sql)
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 删除关联，仅限属于该供应商的记录
    pub async fn remove_product_link(&self, supplier_id: &str, link_id: &str) -> Result<bool> {
        let sql = self
            .dialect
            .sql("DELETE FROM product_suppliers WHERE id = $1 AND supplier_id = $2");

        let result = sqlx::query(&sql)
            .bind(link_id)
            .bind(supplier_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
