//! 集成测试公共工具
//!
//! 每个测试使用独立的内存 SQLite，通过 `oneshot` 直接调用完整路由。

#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use erp_api::{AppState, build_router, schema};
use erp_shared::config::{AppConfig, DatabaseConfig, IN_MEMORY_SQLITE_URL};
use erp_shared::database::Database;
use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use serde_json::{Value, json};
use tower::ServiceExt;

pub struct TestApp {
    router: Router,
    pub db: Database,
}

/// 响应状态与解析后的信封
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn code(&self) -> &str {
        self.body["responseCode"].as_str().unwrap_or_default()
    }

    pub fn desc(&self) -> &str {
        self.body["responseDesc"].as_str().unwrap_or_default()
    }

    pub fn data(&self) -> &Value {
        &self.body["responseData"]
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let config = AppConfig {
            database: DatabaseConfig {
                url: IN_MEMORY_SQLITE_URL.to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let db = Database::connect(&config.database).await.unwrap();
        schema::initialize(&db).await.unwrap();

        let router = build_router(AppState::new(db.clone()), &config);
        Self { router, db }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// 发送原始请求，用于构造非法 JSON 等场景
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// 创建商品并返回 id
    pub async fn create_product(&self, sku: &str, price: f64, quantity: i64) -> String {
        let response = self
            .post(
                "/api/products",
                json!({
                    "name": format!("Product {sku}"),
                    "sku": sku,
                    "price": price,
                    "quantity": quantity,
                    "category": "hardware",
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data()["id"].as_str().unwrap().to_string()
    }

    /// 创建随机姓名的客户并返回 id
    pub async fn create_customer(&self) -> String {
        let name: String = Name().fake();
        let email = format!("{}@example.com", uuid::Uuid::new_v4().simple());
        let response = self
            .post("/api/customers", json!({ "name": name, "email": email }))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data()["id"].as_str().unwrap().to_string()
    }

    pub async fn create_supplier(&self, code: &str) -> String {
        let name: String = CompanyName().fake();
        let response = self
            .post("/api/suppliers", json!({ "name": name, "code": code }))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data()["id"].as_str().unwrap().to_string()
    }

    pub async fn create_warehouse(&self, code: &str) -> String {
        let response = self
            .post(
                "/api/warehouses",
                json!({ "code": code, "name": format!("Warehouse {code}"), "capacity": 1000 }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data()["id"].as_str().unwrap().to_string()
    }
}
