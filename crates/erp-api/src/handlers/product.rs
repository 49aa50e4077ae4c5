//! 商品 API 处理器
//!
//! 商品的 CRUD、分页检索，以及按商品查看供应商与各仓库存

use axum::Json;
use axum::extract::{Path, Query, State};
use axum_extra::extract::WithRejection;
use serde_json::Value;
use tracing::info;
use validator::Validate;

use super::{JsonBody, QueryParams, updated};
use crate::dto::{
    ApiResponse, CreateProductRequest, ListQuery, Pagination, ProductInventory, ProductPage,
    ProductSuppliers, UpdateProductRequest,
};
use crate::error::{ApiError, Result};
use crate::models::{InventorySummary, Product, Timestamp};
use crate::repository::ListFilter;
use crate::state::AppState;

const DUPLICATE_SKU: &str = "Duplicated SKU";
const DUPLICATE_SKU_DETAILS: &str = "A product with this SKU already exists";

async fn load_product(state: &AppState, id: &str) -> Result<Product> {
    state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))
}

/// 创建商品
///
/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    WithRejection(Json(req), _): JsonBody<CreateProductRequest>,
) -> Result<ApiResponse<Product>> {
    req.validate()?;

    let product = req.into_product();
    state
        .products
        .create(&product)
        .await
        .map_err(|e| ApiError::duplicate_or(e, DUPLICATE_SKU, DUPLICATE_SKU_DETAILS))?;

    info!(product_id = %product.id, sku = %product.sku, "Product created");

    Ok(ApiResponse::created("Product created successfully", product))
}

/// 分页查询商品
///
/// GET /api/products?page=&page_size=&search=&category=
pub async fn list_products(
    State(state): State<AppState>,
    WithRejection(Query(query), _): QueryParams<ListQuery>,
) -> Result<ApiResponse<ProductPage>> {
    let page = query.page();
    let page_size = query.page_size();
    let filter = ListFilter {
        page,
        page_size,
        search: query.search.as_deref(),
        exact: query.category.as_deref(),
    };

    let (products, total) = state.products.list_paginated(&filter).await?;

    Ok(ApiResponse::ok(
        "Products retrieved successfully",
        ProductPage {
            products,
            pagination: Pagination::new(page, page_size, total),
        },
    ))
}

/// 查询全部商品
///
/// GET /api/products/list
pub async fn list_all_products(State(state): State<AppState>) -> Result<ApiResponse<Vec<Product>>> {
    let products = state.products.list_all().await?;
    Ok(ApiResponse::ok("Products retrieved successfully", products))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Product>> {
    let product = load_product(&state, &id).await?;
    Ok(ApiResponse::ok("Product retrieved successfully", product))
}

/// 更新商品
///
/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<UpdateProductRequest>,
) -> Result<ApiResponse<Value>> {
    req.validate()?;

    let mut product = load_product(&state, &id).await?;
    let fields = req.apply_to(&mut product).into_fields();

    if !fields.is_empty() {
        product.updated_at = Timestamp::now();
        let found = state
            .products
            .update(&product)
            .await
            .map_err(|e| ApiError::duplicate_or(e, DUPLICATE_SKU, DUPLICATE_SKU_DETAILS))?;
        if !found {
            return Err(ApiError::not_found("Product not found"));
        }
        info!(product_id = %id, ?fields, "Product updated");
    }

    Ok(updated("product", &product, fields))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>> {
    if !state.products.delete(&id).await? {
        return Err(ApiError::not_found("Product not found"));
    }

    info!(product_id = %id, "Product deleted");
    Ok(ApiResponse::ok_empty("Product deleted successfully"))
}

/// 商品的供应商列表，首选供应商在前
///
/// GET /api/products/{id}/suppliers
pub async fn list_product_suppliers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<ProductSuppliers>> {
    let product = load_product(&state, &id).await?;
    let suppliers = state.suppliers.list_suppliers_for_product(&id).await?;

    Ok(ApiResponse::ok(
        "Product suppliers retrieved successfully",
        ProductSuppliers {
            product,
            count: suppliers.len(),
            suppliers,
        },
    ))
}

/// 商品在各仓库的库存
///
/// GET /api/products/{id}/inventory
pub async fn get_product_inventory(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<ProductInventory>> {
    let product = load_product(&state, &id).await?;
    let inventory = state.warehouses.list_inventory_by_product(&id).await?;

    Ok(ApiResponse::ok(
        "Product inventory retrieved successfully",
        ProductInventory {
            product,
            summary: InventorySummary::from_records(&inventory),
            inventory,
        },
    ))
}
