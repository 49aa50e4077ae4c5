//! 业务服务层
//!
//! 单表 CRUD 由 handler 直接调用仓储完成，需要跨表事务的流程放在这里。

mod order_service;

pub use order_service::{OrderError, OrderLine, OrderService, PlacedOrder, to_cents};
