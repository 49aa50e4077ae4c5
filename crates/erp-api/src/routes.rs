//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{handlers, state::AppState};

/// 服务说明、健康检查与诊断
pub fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::system::index))
        .route("/health", get(handlers::system::health))
        .route("/debug/db", get(handlers::system::debug_db))
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(handlers::product::create_product))
        .route("/products", get(handlers::product::list_products))
        // 不分页的全量列表
        .route("/products/list", get(handlers::product::list_all_products))
        .route("/products/{id}", get(handlers::product::get_product))
        .route("/products/{id}", put(handlers::product::update_product))
        .route("/products/{id}", delete(handlers::product::delete_product))
        .route(
            "/products/{id}/suppliers",
            get(handlers::product::list_product_suppliers),
        )
        .route(
            "/products/{id}/inventory",
            get(handlers::product::get_product_inventory),
        )
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", post(handlers::customer::create_customer))
        .route("/customers", get(handlers::customer::list_customers))
        .route("/customers/list", get(handlers::customer::list_all_customers))
        .route("/customers/{id}", get(handlers::customer::get_customer))
        .route("/customers/{id}", put(handlers::customer::update_customer))
        .route("/customers/{id}", delete(handlers::customer::delete_customer))
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(handlers::order::create_order))
        .route("/orders", get(handlers::order::list_orders))
        .route("/orders/{id}/items", get(handlers::order::list_order_items))
}

fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers", post(handlers::supplier::create_supplier))
        .route("/suppliers", get(handlers::supplier::list_suppliers))
        .route("/suppliers/{id}", get(handlers::supplier::get_supplier))
        .route("/suppliers/{id}", put(handlers::supplier::update_supplier))
        .route("/suppliers/{id}", delete(handlers::supplier::delete_supplier))
        // 商品关联
        .route(
            "/suppliers/{id}/products",
            post(handlers::supplier::add_supplier_product),
        )
        .route(
            "/suppliers/{id}/products",
            get(handlers::supplier::list_supplier_products),
        )
        .route(
            "/suppliers/{id}/products/{link_id}",
            delete(handlers::supplier::remove_supplier_product),
        )
}

fn warehouse_routes() -> Router<AppState> {
    Router::new()
        .route("/warehouses", post(handlers::warehouse::create_warehouse))
        .route("/warehouses", get(handlers::warehouse::list_warehouses))
        .route("/warehouses/{id}", get(handlers::warehouse::get_warehouse))
        .route("/warehouses/{id}", put(handlers::warehouse::update_warehouse))
        .route("/warehouses/{id}", delete(handlers::warehouse::delete_warehouse))
        // 库位
        .route(
            "/warehouses/{id}/locations",
            post(handlers::warehouse::create_location),
        )
        .route(
            "/warehouses/{id}/locations",
            get(handlers::warehouse::list_locations),
        )
        .route(
            "/warehouses/{id}/locations/available",
            get(handlers::warehouse::list_available_locations),
        )
        .route(
            "/warehouses/{id}/locations/{location_id}",
            put(handlers::warehouse::update_location),
        )
        // 库存
        .route(
            "/warehouses/{id}/inventory",
            post(handlers::inventory::create_inventory),
        )
        .route(
            "/warehouses/{id}/inventory",
            get(handlers::inventory::list_warehouse_inventory),
        )
        .route(
            "/inventory/{inventory_id}",
            put(handlers::inventory::update_inventory),
        )
}

/// 构建所有 `/api` 下的业务路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(product_routes())
        .merge(customer_routes())
        .merge(order_routes())
        .merge(supplier_routes())
        .merge(warehouse_routes())
}
