//! 库存 API 处理器

use axum::Json;
use axum::extract::{Path, State};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};
use tracing::info;
use validator::Validate;

use super::warehouse::load_warehouse;
use super::{JsonBody, updated};
use crate::dto::{ApiResponse, CreateInventoryRequest, UpdateInventoryRequest, WarehouseInventory};
use crate::error::{ApiError, Result};
use crate::models::{Inventory, InventorySummary, Timestamp};
use crate::state::AppState;

/// 在仓库中登记商品库存
///
/// 指定库位时，库位必须属于该仓库
///
/// POST /api/warehouses/{id}/inventory
pub async fn create_inventory(
    State(state): State<AppState>,
    Path(warehouse_id): Path<String>,
    WithRejection(Json(req), _): JsonBody<CreateInventoryRequest>,
) -> Result<ApiResponse<Inventory>> {
    req.validate()?;

    load_warehouse(&state, &warehouse_id).await?;

    if state.products.find_by_id(&req.product_id).await?.is_none() {
        return Err(ApiError::bad_request(
            "Invalid product ID",
            Some(json!("Product not found")),
        ));
    }

    if let Some(location_id) = req.location_id.as_deref() {
        let belongs = state
            .warehouses
            .find_location(location_id)
            .await?
            .is_some_and(|l| l.warehouse_id == warehouse_id);
        if !belongs {
            return Err(ApiError::bad_request(
                "Invalid location ID",
                Some(json!("Location not found in this warehouse")),
            ));
        }
    }

    let inventory = req.into_inventory(warehouse_id);
    state
        .warehouses
        .create_inventory(&inventory)
        .await
        .map_err(|e| {
            ApiError::duplicate_or(
                e,
                "Duplicate inventory",
                "Inventory for this product already exists at this location",
            )
        })?;

    info!(
        inventory_id = %inventory.id,
        product_id = %inventory.product_id,
        warehouse_id = %inventory.warehouse_id,
        quantity = inventory.quantity,
        "Inventory created"
    );

    let inventory = state
        .warehouses
        .find_inventory(&inventory.id)
        .await?
        .unwrap_or(inventory);

    Ok(ApiResponse::created("Inventory created successfully", inventory))
}

/// 仓库库存列表及汇总
///
/// GET /api/warehouses/{id}/inventory
pub async fn list_warehouse_inventory(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<WarehouseInventory>> {
    let warehouse = load_warehouse(&state, &id).await?;
    let inventory = state.warehouses.list_inventory_by_warehouse(&id).await?;

    Ok(ApiResponse::ok(
        "Inventory retrieved successfully",
        WarehouseInventory {
            warehouse,
            summary: InventorySummary::from_records(&inventory),
            inventory,
        },
    ))
}

/// 调整库存数量或预警值
///
/// 数量不能低于已占用数量；数量增加时刷新补货时间
///
/// PUT /api/inventory/{inventory_id}
pub async fn update_inventory(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<UpdateInventoryRequest>,
) -> Result<ApiResponse<Value>> {
    req.validate()?;

    let mut inventory = state
        .warehouses
        .find_inventory(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Inventory not found"))?;

    let reserved = inventory.reserved_quantity;
    if let Some(quantity) = req.quantity.filter(|q| *q < reserved) {
        return Err(ApiError::bad_request(
            "Invalid quantity",
            Some(json!({
                "quantity": quantity,
                "reserved_quantity": reserved,
                "message": "Quantity cannot be less than reserved quantity",
            })),
        ));
    }

    let previous = inventory.quantity;
    let fields = req.apply_to(&mut inventory).into_fields();

    if !fields.is_empty() {
        let now = Timestamp::now();
        if inventory.quantity > previous {
            inventory.last_restocked = Some(now);
        }
        inventory.available_quantity = inventory.quantity - inventory.reserved_quantity;
        inventory.updated_at = now;

        if !state.warehouses.update_inventory(&inventory).await? {
            return Err(ApiError::not_found("Inventory not found"));
        }
        info!(inventory_id = %id, ?fields, quantity = inventory.quantity, "Inventory updated");
    }

    Ok(updated("inventory", &inventory, fields))
}
