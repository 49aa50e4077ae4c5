//! 实体模型
//!
//! 数据库行与 API 返回共用的实体定义。时间戳以 RFC 3339 文本落库，
//! 使同一个行结构在 PostgreSQL 与 SQLite 下都能解码。

mod customer;
mod order;
mod product;
mod supplier;
mod warehouse;

pub use customer::Customer;
pub use order::{ORDER_STATUS_PENDING, Order, OrderItem};
pub use product::Product;
pub use supplier::{ProductSupplier, ProductSupplierRow, Supplier};
pub use warehouse::{Inventory, InventorySummary, Warehouse, WarehouseLocation};

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Any, Decode, Type, any::AnyTypeInfo, error::BoxDynError};

/// 供应商 / 仓库状态
pub const ENTITY_STATUSES: &[&str] = &["active", "inactive"];

/// 库位状态
pub const LOCATION_STATUSES: &[&str] = &[
    "available",
    "occupied",
    "reserved",
    "maintenance",
    "full",
    "inactive",
];

pub const STATUS_ACTIVE: &str = "active";
pub const LOCATION_AVAILABLE: &str = "available";

/// 未指定时的最低库存预警值
pub const DEFAULT_MIN_QUANTITY: i64 = 10;

/// UTC 时间戳
///
/// 序列化为 RFC 3339 字符串；落库时统一为微秒精度，保证文本排序即时间排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// 落库格式
    pub fn to_db(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// 解析库中的时间文本
    ///
    /// 兼容 SQLite `CURRENT_TIMESTAMP` 产生的 `YYYY-MM-DD HH:MM:SS` 格式
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => Ok(Self(dt.with_timezone(&Utc))),
            Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
                .map(|naive| Self(naive.and_utc())),
        }
    }
}

impl Type<Any> for Timestamp {
    fn type_info() -> AnyTypeInfo {
        <String as Type<Any>>::type_info()
    }

    fn compatible(ty: &AnyTypeInfo) -> bool {
        <String as Type<Any>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Any> for Timestamp {
    fn decode(value: <Any as sqlx::Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
        let raw = <String as Decode<'r, Any>>::decode(value)?;
        Ok(Self::parse(&raw)?)
    }
}
