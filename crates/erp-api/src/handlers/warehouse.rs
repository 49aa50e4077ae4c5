//! 仓库 API 处理器
//!
//! 仓库 CRUD 与库位管理

use axum::Json;
use axum::extract::{Path, State};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};
use tracing::info;
use validator::Validate;

use super::{JsonBody, updated};
use crate::dto::{
    ApiResponse, CreateLocationRequest, CreateWarehouseRequest, UpdateLocationRequest,
    UpdateWarehouseRequest, WarehouseLocations,
};
use crate::error::{ApiError, Result};
use crate::models::{Timestamp, Warehouse, WarehouseLocation};
use crate::state::AppState;

const DUPLICATE_CODE: &str = "Duplicate warehouse code";
const DUPLICATE_CODE_DETAILS: &str = "A warehouse with this code already exists";
const DUPLICATE_LOCATION: &str = "Duplicate location code";
const DUPLICATE_LOCATION_DETAILS: &str = "A location with this code already exists in this warehouse";

pub(super) async fn load_warehouse(state: &AppState, id: &str) -> Result<Warehouse> {
    state
        .warehouses
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Warehouse not found"))
}

/// POST /api/warehouses
pub async fn create_warehouse(
    State(state): State<AppState>,
    WithRejection(Json(req), _): JsonBody<CreateWarehouseRequest>,
) -> Result<ApiResponse<Warehouse>> {
    req.validate()?;

    let warehouse = req.into_warehouse();
    state
        .warehouses
        .create(&warehouse)
        .await
        .map_err(|e| ApiError::duplicate_or(e, DUPLICATE_CODE, DUPLICATE_CODE_DETAILS))?;

    info!(warehouse_id = %warehouse.id, code = %warehouse.code, "Warehouse created");

    Ok(ApiResponse::created("Warehouse created successfully", warehouse))
}

/// GET /api/warehouses
pub async fn list_warehouses(State(state): State<AppState>) -> Result<ApiResponse<Vec<Warehouse>>> {
    let warehouses = state.warehouses.list_all().await?;
    Ok(ApiResponse::ok("Warehouses retrieved successfully", warehouses))
}

/// GET /api/warehouses/{id}
pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Warehouse>> {
    let warehouse = load_warehouse(&state, &id).await?;
    Ok(ApiResponse::ok("Warehouse retrieved successfully", warehouse))
}

/// PUT /api/warehouses/{id}
pub async fn update_warehouse(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<UpdateWarehouseRequest>,
) -> Result<ApiResponse<Value>> {
    req.validate()?;

    let mut warehouse = load_warehouse(&state, &id).await?;
    let fields = req.apply_to(&mut warehouse).into_fields();

    if !fields.is_empty() {
        warehouse.updated_at = Timestamp::now();
        let found = state
            .warehouses
            .update(&warehouse)
            .await
            .map_err(|e| ApiError::duplicate_or(e, DUPLICATE_CODE, DUPLICATE_CODE_DETAILS))?;
        if !found {
            return Err(ApiError::not_found("Warehouse not found"));
        }
        info!(warehouse_id = %id, ?fields, "Warehouse updated");
    }

    Ok(updated("warehouse", &warehouse, fields))
}

/// 删除仓库，库位与库存记录随之删除
///
/// DELETE /api/warehouses/{id}
pub async fn delete_warehouse(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Value>> {
    let warehouse = load_warehouse(&state, &id).await?;

    if !state.warehouses.delete(&id).await? {
        return Err(ApiError::not_found("Warehouse not found"));
    }

    info!(warehouse_id = %id, "Warehouse deleted");

    Ok(ApiResponse::ok(
        "Warehouse deleted successfully",
        json!({
            "deleted_warehouse_id": warehouse.id,
            "deleted_warehouse_name": warehouse.name,
        }),
    ))
}

/// POST /api/warehouses/{id}/locations
pub async fn create_location(
    State(state): State<AppState>,
    Path(warehouse_id): Path<String>,
    WithRejection(Json(req), _): JsonBody<CreateLocationRequest>,
) -> Result<ApiResponse<WarehouseLocation>> {
    req.validate()?;

    let warehouse = load_warehouse(&state, &warehouse_id).await?;
    let mut location = req.into_location(warehouse_id);
    state
        .warehouses
        .create_location(&location)
        .await
        .map_err(|e| ApiError::duplicate_or(e, DUPLICATE_LOCATION, DUPLICATE_LOCATION_DETAILS))?;

    info!(
        location_id = %location.id,
        warehouse_id = %location.warehouse_id,
        code = %location.location_code,
        "Warehouse location created"
    );

    location.warehouse_name = Some(warehouse.name);
    Ok(ApiResponse::created("Location created successfully", location))
}

/// GET /api/warehouses/{id}/locations
pub async fn list_locations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<WarehouseLocations>> {
    let warehouse = load_warehouse(&state, &id).await?;
    let locations = state.warehouses.list_locations(&id).await?;

    Ok(ApiResponse::ok(
        "Locations retrieved successfully",
        WarehouseLocations {
            warehouse,
            count: locations.len(),
            locations,
        },
    ))
}

/// 可用库位：状态为 available 且未满
///
/// GET /api/warehouses/{id}/locations/available
pub async fn list_available_locations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<WarehouseLocations>> {
    let warehouse = load_warehouse(&state, &id).await?;
    let locations = state.warehouses.list_available_locations(&id).await?;

    Ok(ApiResponse::ok(
        "Available locations retrieved successfully",
        WarehouseLocations {
            warehouse,
            count: locations.len(),
            locations,
        },
    ))
}

/// PUT /api/warehouses/{id}/locations/{location_id}
pub async fn update_location(
    State(state): State<AppState>,
    Path((warehouse_id, location_id)): Path<(String, String)>,
    WithRejection(Json(req), _): JsonBody<UpdateLocationRequest>,
) -> Result<ApiResponse<Value>> {
    req.validate()?;

    load_warehouse(&state, &warehouse_id).await?;
    let mut location = state
        .warehouses
        .find_location(&location_id)
        .await?
        .filter(|l| l.warehouse_id == warehouse_id)
        .ok_or_else(|| ApiError::not_found("Location not found"))?;

    let fields = req.apply_to(&mut location).into_fields();
    if !fields.is_empty() {
        location.updated_at = Timestamp::now();
        let found = state
            .warehouses
            .update_location(&location)
            .await
            .map_err(|e| {
                ApiError::duplicate_or(e, DUPLICATE_LOCATION, DUPLICATE_LOCATION_DETAILS)
            })?;
        if !found {
            return Err(ApiError::not_found("Location not found"));
        }
        info!(location_id = %location_id, ?fields, "Warehouse location updated");
    }

    Ok(updated("location", &location, fields))
}
