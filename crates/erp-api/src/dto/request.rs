//! 请求 DTO 定义
//!
//! 创建请求校验必填字段；更新请求的字段全部可选，只合并出现且有变化的字段。
//! 可选文本字段中的空字符串在反序列化时视为未提供。

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{
    Customer, DEFAULT_MIN_QUANTITY, ENTITY_STATUSES, Inventory, LOCATION_STATUSES, Product,
    Supplier, Warehouse, WarehouseLocation,
};
use crate::service::OrderLine;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

static SKU_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9\-]+$").unwrap_or_else(|e| panic!("SKU 正则无效: {e}"))
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\d\s\-\+\(\)]+$").unwrap_or_else(|e| panic!("电话正则无效: {e}"))
});

fn validate_sku(sku: &str) -> Result<(), ValidationError> {
    let len = sku.chars().count();
    if SKU_RE.is_match(sku) && (3..=50).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new("sku")
            .with_message("SKU must be alphanumeric with hyphens, 3-50 characters".into()))
    }
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let len = phone.chars().count();
    if PHONE_RE.is_match(phone) && (10..=20).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("Invalid phone number format".into()))
    }
}

fn validate_entity_status(status: &str) -> Result<(), ValidationError> {
    if ENTITY_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(ValidationError::new("status")
            .with_message("Status must be one of: active, inactive".into()))
    }
}

fn validate_location_status(status: &str) -> Result<(), ValidationError> {
    if LOCATION_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(ValidationError::new("status").with_message(
            format!("Status must be one of: {}", LOCATION_STATUSES.join(", ")).into(),
        ))
    }
}

/// 空白字符串视为未提供
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// 更新时的字段合并
///
/// 仅当请求提供了值且与现值不同才写入，并记录字段名
#[derive(Debug, Default)]
pub struct FieldChanges {
    fields: Vec<&'static str>,
}

impl FieldChanges {
    pub fn merge<T: PartialEq + Clone>(&mut self, name: &'static str, target: &mut T, value: Option<&T>) {
        match value {
            Some(value) if target != value => {
                *target = value.clone();
                self.fields.push(name);
            }
            _ => {}
        }
    }

    pub fn merge_optional<T: PartialEq + Clone>(
        &mut self,
        name: &'static str,
        target: &mut Option<T>,
        value: Option<&T>,
    ) {
        match value {
            Some(value) if target.as_ref() != Some(value) => {
                *target = Some(value.clone());
                self.fields.push(name);
            }
            _ => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Vec<&'static str> {
        self.fields
    }
}

// ---------------------------------------------------------------
// 分页
// ---------------------------------------------------------------

/// 列表查询参数
///
/// 数值参数以原始文本接收，无法解析或超出范围时回退为默认值
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub email: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PAGE)
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| (1..=MAX_PAGE_SIZE).contains(p))
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

// ---------------------------------------------------------------
// 商品
// ---------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_sku"))]
    pub sku: String,
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: f64,
    #[validate(range(min = 0, message = "Quantity must be greater than or equal to 0"))]
    pub quantity: i64,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 50, message = "Category must be at most 50 characters"))]
    pub category: Option<String>,
}

impl CreateProductRequest {
    pub fn into_product(self) -> Product {
        Product::new(
            self.name,
            self.description,
            self.sku,
            self.price,
            self.quantity,
            self.category,
        )
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_sku"))]
    pub sku: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than 0"))]
    pub price: Option<f64>,
    #[validate(range(min = 0, message = "Quantity must be greater than or equal to 0"))]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 50, message = "Category must be at most 50 characters"))]
    pub category: Option<String>,
}

impl UpdateProductRequest {
    pub fn apply_to(&self, product: &mut Product) -> FieldChanges {
        let mut changes = FieldChanges::default();
        changes.merge("name", &mut product.name, self.name.as_ref());
        changes.merge_optional("description", &mut product.description, self.description.as_ref());
        changes.merge("sku", &mut product.sku, self.sku.as_ref());
        changes.merge("price", &mut product.price, self.price.as_ref());
        changes.merge("quantity", &mut product.quantity, self.quantity.as_ref());
        changes.merge_optional("category", &mut product.category, self.category.as_ref());
        changes
    }
}

// ---------------------------------------------------------------
// 客户
// ---------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 200, message = "Address must be at most 200 characters"))]
    pub address: Option<String>,
}

impl CreateCustomerRequest {
    pub fn into_customer(self) -> Customer {
        Customer::new(self.name, self.email, self.phone, self.address)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 200, message = "Address must be at most 200 characters"))]
    pub address: Option<String>,
}

impl UpdateCustomerRequest {
    pub fn apply_to(&self, customer: &mut Customer) -> FieldChanges {
        let mut changes = FieldChanges::default();
        changes.merge("name", &mut customer.name, self.name.as_ref());
        changes.merge("email", &mut customer.email, self.email.as_ref());
        changes.merge_optional("phone", &mut customer.phone, self.phone.as_ref());
        changes.merge_optional("address", &mut customer.address, self.address.as_ref());
        changes
    }
}

// ---------------------------------------------------------------
// 订单
// ---------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct OrderItemRequest {
    #[validate(length(min = 1, message = "Product ID is required"))]
    pub product_id: String,
    #[validate(range(min = 1, message = "Quantity must be greater than 0"))]
    pub quantity: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "Customer ID is required"))]
    pub customer_id: String,
    #[validate(length(min = 1, message = "At least one item is required"), nested)]
    pub items: Vec<OrderItemRequest>,
}

impl CreateOrderRequest {
    pub fn lines(&self) -> Vec<OrderLine> {
        self.items
            .iter()
            .map(|item| OrderLine {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
            })
            .collect()
    }
}

// ---------------------------------------------------------------
// 供应商
// ---------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSupplierRequest {
    #[validate(length(min = 2, max = 255, message = "Name must be 2-255 characters"))]
    pub name: String,
    #[validate(length(min = 2, max = 50, message = "Code must be 2-50 characters"))]
    pub code: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 255, message = "Contact person must be at most 255 characters"))]
    pub contact_person: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 50, message = "Phone must be at most 50 characters"))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 100, message = "Tax ID must be at most 100 characters"))]
    pub tax_id: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 500, message = "Payment terms must be at most 500 characters"))]
    pub payment_terms: Option<String>,
}

impl CreateSupplierRequest {
    pub fn into_supplier(self) -> Supplier {
        Supplier::new(
            self.name,
            self.code,
            self.contact_person,
            self.email,
            self.phone,
            self.address,
            self.tax_id,
            self.payment_terms,
        )
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSupplierRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(min = 2, max = 255, message = "Name must be 2-255 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(min = 2, max = 50, message = "Code must be 2-50 characters"))]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 255, message = "Contact person must be at most 255 characters"))]
    pub contact_person: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 50, message = "Phone must be at most 50 characters"))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 100, message = "Tax ID must be at most 100 characters"))]
    pub tax_id: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 500, message = "Payment terms must be at most 500 characters"))]
    pub payment_terms: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_entity_status"))]
    pub status: Option<String>,
}

impl UpdateSupplierRequest {
    pub fn apply_to(&self, supplier: &mut Supplier) -> FieldChanges {
        let mut changes = FieldChanges::default();
        changes.merge("name", &mut supplier.name, self.name.as_ref());
        changes.merge("code", &mut supplier.code, self.code.as_ref());
        changes.merge_optional("contact_person", &mut supplier.contact_person, self.contact_person.as_ref());
        changes.merge_optional("email", &mut supplier.email, self.email.as_ref());
        changes.merge_optional("phone", &mut supplier.phone, self.phone.as_ref());
        changes.merge_optional("address", &mut supplier.address, self.address.as_ref());
        changes.merge_optional("tax_id", &mut supplier.tax_id, self.tax_id.as_ref());
        changes.merge_optional("payment_terms", &mut supplier.payment_terms, self.payment_terms.as_ref());
        changes.merge("status", &mut supplier.status, self.status.as_ref());
        changes
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddProductSupplierRequest {
    #[validate(length(min = 1, message = "Product ID is required"))]
    pub product_id: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 100, message = "Supplier SKU must be at most 100 characters"))]
    pub supplier_sku: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Cost price must be greater than 0"))]
    pub cost_price: f64,
    #[validate(range(min = 0, message = "Lead time must be greater than or equal to 0"))]
    pub lead_time_days: Option<i64>,
    #[serde(default)]
    pub is_primary: bool,
}

// ---------------------------------------------------------------
// 仓库
// ---------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWarehouseRequest {
    #[validate(length(min = 2, max = 50, message = "Code must be 2-50 characters"))]
    pub code: String,
    #[validate(length(min = 2, max = 255, message = "Name must be 2-255 characters"))]
    pub name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 500, message = "Location must be at most 500 characters"))]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 255, message = "Manager name must be at most 255 characters"))]
    pub manager_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 50, message = "Phone must be at most 50 characters"))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(range(min = 0, message = "Capacity must be greater than or equal to 0"))]
    pub capacity: Option<i64>,
}

impl CreateWarehouseRequest {
    pub fn into_warehouse(self) -> Warehouse {
        Warehouse::new(
            self.code,
            self.name,
            self.location,
            self.manager_name,
            self.phone,
            self.email,
            self.capacity,
        )
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateWarehouseRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(min = 2, max = 50, message = "Code must be 2-50 characters"))]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(min = 2, max = 255, message = "Name must be 2-255 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 500, message = "Location must be at most 500 characters"))]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 255, message = "Manager name must be at most 255 characters"))]
    pub manager_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 50, message = "Phone must be at most 50 characters"))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(range(min = 0, message = "Capacity must be greater than or equal to 0"))]
    pub capacity: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_entity_status"))]
    pub status: Option<String>,
}

impl UpdateWarehouseRequest {
    pub fn apply_to(&self, warehouse: &mut Warehouse) -> FieldChanges {
        let mut changes = FieldChanges::default();
        changes.merge("code", &mut warehouse.code, self.code.as_ref());
        changes.merge("name", &mut warehouse.name, self.name.as_ref());
        changes.merge_optional("location", &mut warehouse.location, self.location.as_ref());
        changes.merge_optional("manager_name", &mut warehouse.manager_name, self.manager_name.as_ref());
        changes.merge_optional("phone", &mut warehouse.phone, self.phone.as_ref());
        changes.merge_optional("email", &mut warehouse.email, self.email.as_ref());
        changes.merge_optional("capacity", &mut warehouse.capacity, self.capacity.as_ref());
        changes.merge("status", &mut warehouse.status, self.status.as_ref());
        changes
    }
}

// ---------------------------------------------------------------
// 库位
// ---------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocationRequest {
    #[validate(length(min = 1, max = 50, message = "Location code must be 1-50 characters"))]
    pub location_code: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 255, message = "Location name must be at most 255 characters"))]
    pub location_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 50, message = "Zone must be at most 50 characters"))]
    pub zone: Option<String>,
    #[validate(range(min = 0, message = "Row number must be greater than or equal to 0"))]
    pub row_number: Option<i64>,
    #[validate(range(min = 0, message = "Shelf number must be greater than or equal to 0"))]
    pub shelf_number: Option<i64>,
    #[validate(range(min = 0, message = "Max capacity must be greater than or equal to 0"))]
    pub max_capacity: Option<i64>,
}

impl CreateLocationRequest {
    pub fn into_location(self, warehouse_id: String) -> WarehouseLocation {
        WarehouseLocation::new(
            warehouse_id,
            self.location_code,
            self.location_name,
            self.zone,
            self.row_number,
            self.shelf_number,
            self.max_capacity,
        )
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(min = 1, max = 50, message = "Location code must be 1-50 characters"))]
    pub location_code: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 255, message = "Location name must be at most 255 characters"))]
    pub location_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 50, message = "Zone must be at most 50 characters"))]
    pub zone: Option<String>,
    #[validate(range(min = 0, message = "Row number must be greater than or equal to 0"))]
    pub row_number: Option<i64>,
    #[validate(range(min = 0, message = "Shelf number must be greater than or equal to 0"))]
    pub shelf_number: Option<i64>,
    #[validate(range(min = 0, message = "Max capacity must be greater than or equal to 0"))]
    pub max_capacity: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(custom(function = "validate_location_status"))]
    pub status: Option<String>,
}

impl UpdateLocationRequest {
    pub fn apply_to(&self, location: &mut WarehouseLocation) -> FieldChanges {
        let mut changes = FieldChanges::default();
        changes.merge("location_code", &mut location.location_code, self.location_code.as_ref());
        changes.merge_optional("location_name", &mut location.location_name, self.location_name.as_ref());
        changes.merge_optional("zone", &mut location.zone, self.zone.as_ref());
        changes.merge_optional("row_number", &mut location.row_number, self.row_number.as_ref());
        changes.merge_optional("shelf_number", &mut location.shelf_number, self.shelf_number.as_ref());
        changes.merge_optional("max_capacity", &mut location.max_capacity, self.max_capacity.as_ref());
        changes.merge("status", &mut location.status, self.status.as_ref());
        changes
    }
}

// ---------------------------------------------------------------
// 库存
// ---------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInventoryRequest {
    #[validate(length(min = 1, message = "Product ID is required"))]
    pub product_id: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub location_id: Option<String>,
    #[validate(range(min = 0, message = "Quantity must be greater than or equal to 0"))]
    pub quantity: i64,
    #[validate(range(min = 0, message = "Min quantity must be greater than or equal to 0"))]
    pub min_quantity: Option<i64>,
    #[validate(range(min = 0, message = "Max quantity must be greater than or equal to 0"))]
    pub max_quantity: Option<i64>,
}

impl CreateInventoryRequest {
    /// 预警值未提供或为 0 时取默认值
    pub fn effective_min_quantity(&self) -> i64 {
        self.min_quantity
            .filter(|q| *q > 0)
            .unwrap_or(DEFAULT_MIN_QUANTITY)
    }

    pub fn into_inventory(self, warehouse_id: String) -> Inventory {
        let min_quantity = self.effective_min_quantity();
        Inventory::new(
            self.product_id,
            warehouse_id,
            self.location_id,
            self.quantity,
            min_quantity,
            self.max_quantity,
        )
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateInventoryRequest {
    #[validate(range(min = 0, message = "Quantity must be greater than or equal to 0"))]
    pub quantity: Option<i64>,
    #[validate(range(min = 0, message = "Min quantity must be greater than or equal to 0"))]
    pub min_quantity: Option<i64>,
}

impl UpdateInventoryRequest {
    pub fn apply_to(&self, inventory: &mut Inventory) -> FieldChanges {
        let mut changes = FieldChanges::default();
        changes.merge("quantity", &mut inventory.quantity, self.quantity.as_ref());
        changes.merge("min_quantity", &mut inventory.min_quantity, self.min_quantity.as_ref());
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::flatten_validation_errors;
    use serde_json::json;

    fn field_names(errors: validator::ValidationErrors) -> Vec<String> {
        flatten_validation_errors(&errors)
            .into_iter()
            .map(|e| e.field)
            .collect()
    }

    #[test]
    fn test_sku_rules() {
        assert!(validate_sku("ABC-123").is_ok());
        assert!(validate_sku("AB").is_err());
        assert!(validate_sku("ABC_123").is_err());
        assert!(validate_sku(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_phone_rules() {
        assert!(validate_phone("+1 (555) 123-4567").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("555-CALL-NOW").is_err());
    }

    #[test]
    fn test_create_product_validation() {
        let req: CreateProductRequest = serde_json::from_value(json!({
            "name": "A",
            "sku": "ok-sku",
            "price": 0.0,
            "quantity": -1
        }))
        .unwrap();

        assert_eq!(
            field_names(req.validate().unwrap_err()),
            vec!["name", "price", "quantity"]
        );
    }

    #[test]
    fn test_blank_optional_text_is_none() {
        let req: CreateCustomerRequest = serde_json::from_value(json!({
            "name": "Grace Hopper",
            "email": "grace@example.com",
            "phone": "",
            "address": "   "
        }))
        .unwrap();

        assert!(req.phone.is_none());
        assert!(req.address.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_order_items_are_validated_individually() {
        let req: CreateOrderRequest = serde_json::from_value(json!({
            "customer_id": "c1",
            "items": [
                { "product_id": "p1", "quantity": 1 },
                { "product_id": "p2", "quantity": 0 }
            ]
        }))
        .unwrap();

        assert_eq!(field_names(req.validate().unwrap_err()), vec!["items[1].quantity"]);
    }

    #[test]
    fn test_empty_order_is_invalid() {
        let req: CreateOrderRequest = serde_json::from_value(json!({
            "customer_id": "c1",
            "items": []
        }))
        .unwrap();

        assert_eq!(field_names(req.validate().unwrap_err()), vec!["items"]);
    }

    #[test]
    fn test_status_values() {
        let req = UpdateWarehouseRequest {
            status: Some("closed".into()),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = UpdateLocationRequest {
            status: Some("maintenance".into()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_patch_merge_only_reports_real_changes() {
        let mut customer = Customer::new(
            "Grace Hopper".into(),
            "grace@example.com".into(),
            None,
            None,
        );
        let req = UpdateCustomerRequest {
            name: Some("Grace Hopper".into()),
            email: Some("grace@navy.mil".into()),
            address: Some("Arlington".into()),
            ..Default::default()
        };

        let changes = req.apply_to(&mut customer);
        assert_eq!(changes.into_fields(), vec!["email", "address"]);
        assert_eq!(customer.email, "grace@navy.mil");
        assert_eq!(customer.address.as_deref(), Some("Arlington"));

        let again = req.apply_to(&mut customer);
        assert!(again.is_empty());
    }

    #[test]
    fn test_list_query_fallbacks() {
        let query = ListQuery {
            page: Some("0".into()),
            page_size: Some("500".into()),
            ..Default::default()
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), 10);

        let query = ListQuery {
            page: Some("3".into()),
            page_size: Some("abc".into()),
            ..Default::default()
        };
        assert_eq!(query.page(), 3);
        assert_eq!(query.page_size(), 10);

        let query = ListQuery {
            page_size: Some("100".into()),
            ..Default::default()
        };
        assert_eq!(query.page_size(), 100);
    }

    #[test]
    fn test_inventory_min_quantity_default() {
        let req: CreateInventoryRequest = serde_json::from_value(json!({
            "product_id": "p1",
            "quantity": 5,
            "min_quantity": 0
        }))
        .unwrap();
        assert_eq!(req.effective_min_quantity(), DEFAULT_MIN_QUANTITY);

        let inventory = req.into_inventory("w1".into());
        assert_eq!(inventory.min_quantity, DEFAULT_MIN_QUANTITY);
        assert!(inventory.location_id.is_none());
    }
}
