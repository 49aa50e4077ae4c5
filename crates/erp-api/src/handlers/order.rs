//! 订单 API 处理器

use axum::Json;
use axum::extract::{Path, State};
use axum_extra::extract::WithRejection;
use validator::Validate;

use super::JsonBody;
use crate::dto::{
    ApiResponse, CreateOrderRequest, OrderCreated, OrderHeader, OrderItems, OrderSummary,
};
use crate::error::{ApiError, Result};
use crate::models::Order;
use crate::state::AppState;

/// 下单
///
/// 客户、商品与库存校验以及扣减库存都在同一事务内完成
///
/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    WithRejection(Json(req), _): JsonBody<CreateOrderRequest>,
) -> Result<ApiResponse<OrderCreated>> {
    req.validate()?;

    let placed = state
        .order_service
        .place_order(&req.customer_id, &req.lines())
        .await?;

    let summary = OrderSummary {
        total_items: placed.items.len(),
        total_amount: placed.total_amount(),
    };

    Ok(ApiResponse::created(
        "Order created successfully",
        OrderCreated {
            order: OrderHeader::new(&placed.order, &placed.customer.name),
            items: placed.items,
            summary,
        },
    ))
}

/// 订单列表，最新的在前
///
/// GET /api/orders
pub async fn list_orders(State(state): State<AppState>) -> Result<ApiResponse<Vec<Order>>> {
    let orders = state.orders.list_with_customer().await?;
    Ok(ApiResponse::ok("Orders retrieved successfully", orders))
}

/// GET /api/orders/{id}/items
pub async fn list_order_items(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<OrderItems>> {
    if !state.orders.exists(&id).await? {
        return Err(ApiError::not_found("Order not found"));
    }

    let items = state.orders.list_items(&id).await?;

    Ok(ApiResponse::ok(
        "Order items retrieved successfully",
        OrderItems {
            order_id: id,
            count: items.len(),
            items,
        },
    ))
}
