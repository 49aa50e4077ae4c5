//! API 错误类型定义
//!
//! 所有 handler 错误最终转换为 [`ApiError`]，再统一渲染为响应信封

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::dto::{ApiResponse, codes};
use crate::repository::RepoError;
use crate::service::OrderError;

/// 单个字段的校验失败
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// API 错误
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 请求体字段校验失败
    #[error("Validation error")]
    Validation(Vec<FieldError>),

    /// JSON 或查询参数无法解析
    #[error("Validation error")]
    Malformed(String),

    #[error("{message}")]
    BadRequest {
        message: String,
        details: Option<Value>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Duplicate { message: String, details: String },

    #[error("数据库错误: {0}")]
    Database(RepoError),

    #[error("内部错误: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::BadRequest {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// 唯一约束冲突时返回带业务含义的提示，其余错误按原样转换
    pub fn duplicate_or(err: RepoError, message: &str, details: &str) -> Self {
        if err.is_duplicate() {
            Self::Duplicate {
                message: message.to_string(),
                details: details.to_string(),
            }
        } else {
            err.into()
        }
    }

    /// HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::Malformed(_)
            | Self::BadRequest { .. }
            | Self::Duplicate { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 信封中的 responseCode
    pub fn response_code(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::Malformed(_) => codes::VALIDATION,
            Self::BadRequest { .. } => codes::BAD_REQUEST,
            Self::NotFound(_) => codes::NOT_FOUND,
            Self::Duplicate { .. } => codes::DUPLICATE,
            Self::Database(_) | Self::Internal(_) => codes::INTERNAL,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.response_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let (message, data) = match self {
            Self::Database(err) => {
                tracing::error!(error = %err, "数据库操作失败");
                ("Internal server error".to_string(), Some(json!("Database error")))
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "内部错误");
                ("Internal server error".to_string(), None)
            }
            Self::Validation(errors) => ("Validation error".to_string(), Some(json!(errors))),
            Self::Malformed(detail) => ("Validation error".to_string(), Some(json!(detail))),
            Self::BadRequest { message, details } => (message, details),
            Self::NotFound(message) => (message, None),
            Self::Duplicate { message, details } => (message, Some(json!(details))),
        };

        ApiResponse::new(code, message, data).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(_) => Self::Duplicate {
                message: "Duplicate record".to_string(),
                details: "A record with the same unique value already exists".to_string(),
            },
            RepoError::ForeignKey(_) => {
                Self::bad_request("Invalid reference", Some(json!("Referenced record does not exist")))
            }
            other => Self::Database(other),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::from(err).into()
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NoItems => Self::Validation(vec![FieldError {
                field: "items".to_string(),
                message: "At least one item is required".to_string(),
            }]),
            OrderError::CustomerNotFound(_) => {
                Self::bad_request("Invalid customer ID", Some(json!("Customer not found")))
            }
            OrderError::ProductNotFound { product_id } => Self::bad_request(
                "Invalid product ID",
                Some(json!({ "product_id": product_id, "message": "Product not found" })),
            ),
            OrderError::InsufficientStock {
                product_id,
                product_name,
                available,
                requested,
            } => Self::bad_request(
                "Insufficient stock",
                Some(json!({
                    "product_id": product_id,
                    "product_name": product_name,
                    "available": available,
                    "requested": requested,
                })),
            ),
            OrderError::AmountOutOfRange { product_id } => Self::bad_request(
                "Invalid order amount",
                Some(json!({ "product_id": product_id, "message": "Order amount is out of range" })),
            ),
            OrderError::Repository(err) => err.into(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(flatten_validation_errors(&errors))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

/// 展开嵌套的校验错误，字段路径形如 `items[0].quantity`，按字段名排序
pub fn flatten_validation_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect_errors(errors, "", &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|err| FieldError {
                    field: path.clone(),
                    message: err
                        .message
                        .as_deref()
                        .unwrap_or_else(|| default_message(&err.code))
                        .to_string(),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_errors(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_errors(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn default_message(code: &str) -> &'static str {
    match code {
        "required" => "This field is required",
        "email" => "Invalid email format",
        "length" => "Value length is out of range",
        "range" => "Value is out of range",
        _ => "Invalid value",
    }
}
