//! 下单服务
//!
//! 下单是唯一的跨表写入流程，在一个事务内完成：
//!
//! 1. 校验客户存在
//! 2. 按商品 ID 排序后逐个锁定商品行，再逐行校验存在性并按商品累计需求量检查库存
//! 3. 以分为单位计算行金额与订单总额，溢出时拒绝
//! 4. 写入订单头、订单行，并带条件扣减库存
//! 5. 提交；任一步失败整体回滚

use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use erp_shared::observability::metrics::record_order_placement;
use sqlx::{AnyConnection, AnyPool};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::models::{Customer, Order, OrderItem, Timestamp};
use crate::repository::{OrderRepository, RepoError};

/// 下单错误
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("订单至少需要一个商品")]
    NoItems,

    #[error("客户不存在: {0}")]
    CustomerNotFound(String),

    #[error("商品不存在: {product_id}")]
    ProductNotFound { product_id: String },

    #[error("库存不足: {product_name} 可用 {available}, 需要 {requested}")]
    InsufficientStock {
        product_id: String,
        product_name: String,
        available: i64,
        requested: i64,
    },

    #[error("订单金额超出范围: {product_id}")]
    AmountOutOfRange { product_id: String },

    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        Self::Repository(err.into())
    }
}

impl OrderError {
    /// 指标中的结果标签
    fn outcome(&self) -> &'static str {
        match self {
            Self::Repository(_) => "failed",
            _ => "rejected",
        }
    }
}

/// 下单请求中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: i64,
}

/// 已提交的订单
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub customer: Customer,
    pub items: Vec<OrderItem>,
}

impl PlacedOrder {
    pub fn total_amount(&self) -> f64 {
        self.order.total_amount
    }
}

/// 金额转为分，四舍五入
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// 下单服务
#[derive(Clone)]
pub struct OrderService {
    pool: AnyPool,
    orders: OrderRepository,
}

impl OrderService {
    pub fn new(pool: AnyPool, orders: OrderRepository) -> Self {
        Self { pool, orders }
    }

    /// 下单
    #[instrument(skip(self, lines), fields(customer_id = %customer_id, line_count = lines.len()))]
    pub async fn place_order(
        &self,
        customer_id: &str,
        lines: &[OrderLine],
    ) -> Result<PlacedOrder, OrderError> {
        let started = Instant::now();
        let result = self.execute(customer_id, lines).await;

        let outcome = match &result {
            Ok(_) => "created",
            Err(err) => err.outcome(),
        };
        record_order_placement(outcome, lines.len(), started.elapsed().as_secs_f64());

        match &result {
            Ok(placed) => info!(
                order_id = %placed.order.id,
                total_amount = placed.order.total_amount,
                "Order created"
            ),
            Err(OrderError::Repository(err)) => warn!(error = %err, "Order transaction failed"),
            Err(err) => info!(reason = %err, "Order rejected"),
        }

        result
    }

    async fn execute(&self, customer_id: &str, lines: &[OrderLine]) -> Result<PlacedOrder, OrderError> {
        if lines.is_empty() {
            return Err(OrderError::NoItems);
        }

        let mut tx = self.pool.begin().await?;

        match self.write_order(&mut tx, customer_id, lines).await {
            Ok(placed) => {
                tx.commit().await?;
                Ok(placed)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Order rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn write_order(
        &self,
        conn: &mut AnyConnection,
        customer_id: &str,
        lines: &[OrderLine],
    ) -> Result<PlacedOrder, OrderError> {
        let customer = self
            .orders
            .find_customer(conn, customer_id)
            .await?
            .ok_or_else(|| OrderError::CustomerNotFound(customer_id.to_string()))?;

        // 固定加锁顺序，避免并发订单互相等待
        let product_ids: BTreeSet<&str> = lines.iter().map(|l| l.product_id.as_str()).collect();
        let mut products = HashMap::with_capacity(product_ids.len());
        for product_id in product_ids {
            let product = self.orders.find_product(conn, product_id).await?;
            products.insert(product_id, product);
        }

        let mut requested: HashMap<&str, i64> = HashMap::new();
        let mut items = Vec::with_capacity(lines.len());
        let mut total_cents = 0_i64;

        for line in lines {
            let product = products
                .get(line.product_id.as_str())
                .and_then(Option::as_ref)
                .ok_or_else(|| OrderError::ProductNotFound {
                    product_id: line.product_id.clone(),
                })?;

            // 饱和累加：超过 i64 上限必然超出库存，其余由扣减条件兜底
            let cumulative = requested.entry(line.product_id.as_str()).or_insert(0);
            *cumulative = cumulative.saturating_add(line.quantity);
            if *cumulative > product.quantity {
                return Err(OrderError::InsufficientStock {
                    product_id: product.id.clone(),
                    product_name: product.name.clone(),
                    available: product.quantity,
                    requested: *cumulative,
                });
            }

            let unit_cents = to_cents(product.price);
            let line_cents = unit_cents
                .checked_mul(line.quantity)
                .ok_or_else(|| OrderError::AmountOutOfRange {
                    product_id: product.id.clone(),
                })?;
            total_cents = total_cents
                .checked_add(line_cents)
                .ok_or_else(|| OrderError::AmountOutOfRange {
                    product_id: product.id.clone(),
                })?;

            items.push(OrderItem {
                id: uuid::Uuid::new_v4().to_string(),
                order_id: String::new(),
                product_id: product.id.clone(),
                quantity: line.quantity,
                unit_price: from_cents(unit_cents),
                total_price: from_cents(line_cents),
                product_name: Some(product.name.clone()),
            });
        }

        let mut order = Order::new(customer.id.clone(), from_cents(total_cents));
        order.customer_name = Some(customer.name.clone());
        for item in &mut items {
            item.order_id = order.id.clone();
        }

        self.orders.insert_order(conn, &order).await?;

        let updated_at = Timestamp::now().to_db();
        for item in &items {
            self.orders.insert_item(conn, item).await?;

            let decremented = self
                .orders
                .decrement_stock(conn, &item.product_id, item.quantity, &updated_at)
                .await?;
            if !decremented {
                let available = self
                    .orders
                    .find_product(conn, &item.product_id)
                    .await?
                    .map_or(0, |p| p.quantity);
                return Err(OrderError::InsufficientStock {
                    product_id: item.product_id.clone(),
                    product_name: item.product_name.clone().unwrap_or_default(),
                    available,
                    requested: item.quantity,
                });
            }
        }

        Ok(PlacedOrder {
            order,
            customer,
            items,
        })
    }
}
