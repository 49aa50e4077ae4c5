//! 系统接口：服务说明、健康检查、数据库诊断

use axum::extract::State;
use serde_json::{Value, json};
use tracing::warn;

use crate::dto::{ApiResponse, codes};
use crate::error::Result;
use crate::state::AppState;

/// 服务说明
///
/// GET /
pub async fn index() -> ApiResponse<Value> {
    ApiResponse::ok(
        "ERP API is running",
        json!({
            "service": "erp-api",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "health": "/health",
                "products": "/api/products",
                "customers": "/api/customers",
                "orders": "/api/orders",
                "suppliers": "/api/suppliers",
                "warehouses": "/api/warehouses",
                "inventory": "/api/inventory/{inventory_id}",
            },
        }),
    )
}

/// 健康检查：数据库可连通才视为健康
///
/// GET /health
pub async fn health(State(state): State<AppState>) -> ApiResponse<Value> {
    let database = state.db.dialect().name();

    match state.db.health_check().await {
        Ok(()) => ApiResponse::ok(
            "Service is healthy",
            json!({ "status": "healthy", "database": database }),
        ),
        Err(err) => {
            warn!(error = %err, "Database health check failed");
            ApiResponse::new(
                codes::INTERNAL,
                "Service is unhealthy",
                Some(json!({ "status": "unhealthy", "database": database })),
            )
        }
    }
}

/// 各表行数
///
/// GET /debug/db
pub async fn debug_db(State(state): State<AppState>) -> Result<ApiResponse<Value>> {
    let counts = json!({
        "products": state.products.count().await?,
        "customers": state.customers.count().await?,
        "orders": state.orders.count().await?,
        "order_items": state.orders.count_items().await?,
        "suppliers": state.suppliers.count().await?,
        "warehouses": state.warehouses.count().await?,
        "warehouse_locations": state.warehouses.count_locations().await?,
        "inventory": state.warehouses.count_inventory().await?,
    });

    Ok(ApiResponse::ok(
        "Database status",
        json!({ "dialect": state.db.dialect().name(), "tables": counts }),
    ))
}
