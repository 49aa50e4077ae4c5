//! 供应商 API 处理器
//!
//! 供应商 CRUD 以及商品与供应商的关联管理

use axum::Json;
use axum::extract::{Path, State};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};
use tracing::info;
use validator::Validate;

use super::{JsonBody, updated};
use crate::dto::{
    AddProductSupplierRequest, ApiResponse, CreateSupplierRequest, SupplierProducts,
    UpdateSupplierRequest,
};
use crate::error::{ApiError, Result};
use crate::models::{ProductSupplier, Supplier, Timestamp};
use crate::state::AppState;

const DUPLICATE_CODE: &str = "Duplicate supplier code";
const DUPLICATE_CODE_DETAILS: &str = "A supplier with this code already exists";

async fn load_supplier(state: &AppState, id: &str) -> Result<Supplier> {
    state
        .suppliers
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Supplier not found"))
}

/// POST /api/suppliers
pub async fn create_supplier(
    State(state): State<AppState>,
    WithRejection(Json(req), _): JsonBody<CreateSupplierRequest>,
) -> Result<ApiResponse<Supplier>> {
    req.validate()?;

    let supplier = req.into_supplier();
    state
        .suppliers
        .create(&supplier)
        .await
        .map_err(|e| ApiError::duplicate_or(e, DUPLICATE_CODE, DUPLICATE_CODE_DETAILS))?;

    info!(supplier_id = %supplier.id, code = %supplier.code, "Supplier created");

    Ok(ApiResponse::created("Supplier created successfully", supplier))
}

/// GET /api/suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> Result<ApiResponse<Vec<Supplier>>> {
    let suppliers = state.suppliers.list_all().await?;
    Ok(ApiResponse::ok("Suppliers retrieved successfully", suppliers))
}

/// GET /api/suppliers/{id}
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Supplier>> {
    let supplier = load_supplier(&state, &id).await?;
    Ok(ApiResponse::ok("Supplier retrieved successfully", supplier))
}

/// PUT /api/suppliers/{id}
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<UpdateSupplierRequest>,
) -> Result<ApiResponse<Value>> {
    req.validate()?;

    let mut supplier = load_supplier(&state, &id).await?;
    let fields = req.apply_to(&mut supplier).into_fields();

    if !fields.is_empty() {
        supplier.updated_at = Timestamp::now();
        let found = state
            .suppliers
            .update(&supplier)
            .await
            .map_err(|e| ApiError::duplicate_or(e, DUPLICATE_CODE, DUPLICATE_CODE_DETAILS))?;
        if !found {
            return Err(ApiError::not_found("Supplier not found"));
        }
        info!(supplier_id = %id, ?fields, "Supplier updated");
    }

    Ok(updated("supplier", &supplier, fields))
}

/// 删除供应商，商品关联随之删除
///
/// DELETE /api/suppliers/{id}
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Value>> {
    let supplier = load_supplier(&state, &id).await?;

    if !state.suppliers.delete(&id).await? {
        return Err(ApiError::not_found("Supplier not found"));
    }

    info!(supplier_id = %id, "Supplier deleted");

    Ok(ApiResponse::ok(
        "Supplier deleted successfully",
        json!({
            "deleted_supplier_id": supplier.id,
            "deleted_supplier_name": supplier.name,
        }),
    ))
}

/// 为供应商关联商品
///
/// POST /api/suppliers/{id}/products
pub async fn add_supplier_product(
    State(state): State<AppState>,
    Path(supplier_id): Path<String>,
    WithRejection(Json(req), _): JsonBody<AddProductSupplierRequest>,
) -> Result<ApiResponse<ProductSupplier>> {
    req.validate()?;

    load_supplier(&state, &supplier_id).await?;
    if state.products.find_by_id(&req.product_id).await?.is_none() {
        return Err(ApiError::bad_request(
            "Invalid product ID",
            Some(json!("Product not found")),
        ));
    }

    let link = ProductSupplier::new(
        req.product_id,
        supplier_id,
        req.supplier_sku,
        Some(req.cost_price),
        req.lead_time_days,
        req.is_primary,
    );
    state.suppliers.add_product_link(&link).await.map_err(|e| {
        ApiError::duplicate_or(
            e,
            "Duplicate product-supplier",
            "This product is already linked to the supplier",
        )
    })?;

    info!(
        link_id = %link.id,
        product_id = %link.product_id,
        supplier_id = %link.supplier_id,
        "Product linked to supplier"
    );

    let link = state
        .suppliers
        .find_product_link(&link.id)
        .await?
        .unwrap_or(link);

    Ok(ApiResponse::created(
        "Product added to supplier successfully",
        link,
    ))
}

/// GET /api/suppliers/{id}/products
pub async fn list_supplier_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<SupplierProducts>> {
    let supplier = load_supplier(&state, &id).await?;
    let products = state.suppliers.list_products_for_supplier(&id).await?;

    Ok(ApiResponse::ok(
        "Supplier products retrieved successfully",
        SupplierProducts {
            supplier,
            count: products.len(),
            products,
        },
    ))
}

/// 解除关联，只删除属于该供应商的记录
///
/// DELETE /api/suppliers/{id}/products/{link_id}
pub async fn remove_supplier_product(
    State(state): State<AppState>,
    Path((supplier_id, link_id)): Path<(String, String)>,
) -> Result<ApiResponse<()>> {
    if !state
        .suppliers
        .remove_product_link(&supplier_id, &link_id)
        .await?
    {
        return Err(ApiError::not_found("Product-supplier relationship not found"));
    }

    info!(supplier_id = %supplier_id, link_id = %link_id, "Product removed from supplier");
    Ok(ApiResponse::ok_empty("Product removed from supplier successfully"))
}
