//! 应用状态定义
//!
//! 包含 Axum 路由共享的数据库与各仓储实例

use erp_shared::database::Database;

use crate::repository::{
    CustomerRepository, OrderRepository, ProductRepository, SupplierRepository,
    WarehouseRepository,
};
use crate::service::OrderService;

/// Axum 应用共享状态
///
/// 仓储内部持有连接池句柄，克隆开销很小
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub products: ProductRepository,
    pub customers: CustomerRepository,
    pub orders: OrderRepository,
    pub suppliers: SupplierRepository,
    pub warehouses: WarehouseRepository,
    pub order_service: OrderService,
}

impl AppState {
    /// 基于同一个连接池构建所有仓储
    pub fn new(db: Database) -> Self {
        let pool = db.pool().clone();
        let dialect = db.dialect();
        let orders = OrderRepository::new(pool.clone(), dialect);

        Self {
            products: ProductRepository::new(pool.clone(), dialect),
            customers: CustomerRepository::new(pool.clone(), dialect),
            suppliers: SupplierRepository::new(pool.clone(), dialect),
            warehouses: WarehouseRepository::new(pool.clone(), dialect),
            order_service: OrderService::new(pool, orders.clone()),
            orders,
            db,
        }
    }
}
