//! 数据库仓储层
//!
//! 提供所有实体的数据访问接口，封装 SQL 操作细节。
//!
//! ## 设计原则
//!
//! - 仓储只负责数据持久化，不包含业务逻辑
//! - SQL 统一以 `$N` 占位符书写，执行前按方言转换
//! - 所有值都通过参数绑定，拼接进 SQL 的只有占位符和固定片段
//! - 事务控制由调用方（服务层）决定，事务内操作接收 `&mut AnyConnection`

mod customer_repo;
mod error;
mod order_repo;
mod product_repo;
mod supplier_repo;
mod warehouse_repo;

pub use customer_repo::CustomerRepository;
pub use error::{RepoError, Result};
pub use order_repo::OrderRepository;
pub use product_repo::ProductRepository;
pub use supplier_repo::SupplierRepository;
pub use warehouse_repo::WarehouseRepository;

/// 分页列表的查询条件
#[derive(Debug, Clone, Copy)]
pub struct ListFilter<'a> {
    pub page: i64,
    pub page_size: i64,
    /// 模糊搜索关键字
    pub search: Option<&'a str>,
    /// 精确匹配字段的值（商品为分类，客户为邮箱）
    pub exact: Option<&'a str>,
}

impl<'a> ListFilter<'a> {
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).max(0).saturating_mul(self.page_size)
    }

    /// LIKE 匹配模式，空白关键字视为未提供
    ///
    /// 关键字中的 `%`、`_` 按字面匹配，配合 [`LIKE_ESCAPE`] 使用
    fn search_pattern(&self) -> Option<String> {
        self.search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)))
    }

    fn exact_value(&self) -> Option<&'a str> {
        self.exact.map(str::trim).filter(|s| !s.is_empty())
    }
}

/// LIKE 转义子句
const LIKE_ESCAPE: &str = r"ESCAPE '\'";

fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filter_offset() {
        let filter = ListFilter {
            page: 3,
            page_size: 10,
            search: None,
            exact: None,
        };
        assert_eq!(filter.offset(), 20);
        assert_eq!(filter.limit(), 10);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = ListFilter {
            page: 1,
            page_size: 10,
            search: Some("   "),
            exact: Some(""),
        };
        assert!(filter.search_pattern().is_none());
        assert!(filter.exact_value().is_none());
    }

    #[test]
    fn test_search_pattern_wraps_keyword() {
        let filter = ListFilter {
            page: 1,
            page_size: 10,
            search: Some(" mouse "),
            exact: Some(" Electronics "),
        };
        assert_eq!(filter.search_pattern().as_deref(), Some("%mouse%"));
        assert_eq!(filter.exact_value(), Some("Electronics"));
    }

    #[test]
    fn test_offset_saturates_for_huge_pages() {
        let filter = ListFilter {
            page: i64::MAX,
            page_size: 10,
            search: None,
            exact: None,
        };
        assert_eq!(filter.offset(), i64::MAX);
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        let filter = ListFilter {
            page: 1,
            page_size: 10,
            search: Some(r"100%_a\b"),
            exact: None,
        };
        assert_eq!(filter.search_pattern().as_deref(), Some(r"%100\%\_a\\b%"));
    }

    #[test]
    fn test_where_clause() {
        assert_eq!(where_clause(&[]), "");
        assert_eq!(
            where_clause(&["a = $1".to_string(), "b = $2".to_string()]),
            " WHERE a = $1 AND b = $2"
        );
    }
}
