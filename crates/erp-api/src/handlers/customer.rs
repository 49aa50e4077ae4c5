//! 客户 API 处理器

use axum::Json;
use axum::extract::{Path, Query, State};
use axum_extra::extract::WithRejection;
use serde_json::Value;
use tracing::info;
use validator::Validate;

use super::{JsonBody, QueryParams, updated};
use crate::dto::{
    ApiResponse, CreateCustomerRequest, CustomerPage, ListQuery, Pagination,
    UpdateCustomerRequest,
};
use crate::error::{ApiError, Result};
use crate::models::{Customer, Timestamp};
use crate::repository::ListFilter;
use crate::state::AppState;

const DUPLICATE_EMAIL: &str = "Duplicate email";
const DUPLICATE_EMAIL_DETAILS: &str = "A customer with this email already exists";

/// POST /api/customers
pub async fn create_customer(
    State(state): State<AppState>,
    WithRejection(Json(req), _): JsonBody<CreateCustomerRequest>,
) -> Result<ApiResponse<Customer>> {
    req.validate()?;

    let customer = req.into_customer();
    state
        .customers
        .create(&customer)
        .await
        .map_err(|e| ApiError::duplicate_or(e, DUPLICATE_EMAIL, DUPLICATE_EMAIL_DETAILS))?;

    info!(customer_id = %customer.id, "Customer created");

    Ok(ApiResponse::created("Customer created successfully", customer))
}

/// 分页查询客户，search 匹配姓名、邮箱与电话
///
/// GET /api/customers?page=&page_size=&search=&email=
pub async fn list_customers(
    State(state): State<AppState>,
    WithRejection(Query(query), _): QueryParams<ListQuery>,
) -> Result<ApiResponse<CustomerPage>> {
    let page = query.page();
    let page_size = query.page_size();
    let filter = ListFilter {
        page,
        page_size,
        search: query.search.as_deref(),
        exact: query.email.as_deref(),
    };

    let (customers, total) = state.customers.list_paginated(&filter).await?;

    Ok(ApiResponse::ok(
        "Customers retrieved successfully",
        CustomerPage {
            customers,
            pagination: Pagination::new(page, page_size, total),
        },
    ))
}

/// GET /api/customers/list
pub async fn list_all_customers(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Customer>>> {
    let customers = state.customers.list_all().await?;
    Ok(ApiResponse::ok("Customers retrieved successfully", customers))
}

/// GET /api/customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Customer>> {
    let customer = state
        .customers
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer not found"))?;

    Ok(ApiResponse::ok("Customer retrieved successfully", customer))
}

/// PUT /api/customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(req), _): JsonBody<UpdateCustomerRequest>,
) -> Result<ApiResponse<Value>> {
    req.validate()?;

    let mut customer = state
        .customers
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer not found"))?;

    let fields = req.apply_to(&mut customer).into_fields();
    if !fields.is_empty() {
        customer.updated_at = Timestamp::now();
        let found = state
            .customers
            .update(&customer)
            .await
            .map_err(|e| ApiError::duplicate_or(e, DUPLICATE_EMAIL, DUPLICATE_EMAIL_DETAILS))?;
        if !found {
            return Err(ApiError::not_found("Customer not found"));
        }
        info!(customer_id = %id, ?fields, "Customer updated");
    }

    Ok(updated("customer", &customer, fields))
}

/// 删除客户，其订单随之级联删除
///
/// DELETE /api/customers/{id}
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>> {
    if !state.customers.delete(&id).await? {
        return Err(ApiError::not_found("Customer not found"));
    }

    info!(customer_id = %id, "Customer deleted");
    Ok(ApiResponse::ok_empty("Customer deleted successfully"))
}
