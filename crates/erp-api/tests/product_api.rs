//! 商品与客户接口集成测试

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_create_and_get_product() {
    let app = TestApp::new().await;
    let id = app.create_product("KB-001", 49.99, 20).await;

    let response = app.get(&format!("/api/products/{id}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.code(), "00");
    assert_eq!(response.data()["sku"], "KB-001");
    assert_eq!(response.data()["price"], 49.99);
    assert_eq!(response.data()["quantity"], 20);
}

#[tokio::test]
async fn test_duplicate_sku_is_rejected() {
    let app = TestApp::new().await;
    app.create_product("DUP-1", 10.0, 1).await;

    let response = app
        .post(
            "/api/products",
            json!({ "name": "Another", "sku": "DUP-1", "price": 5.0, "quantity": 1 }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "15");
    assert_eq!(response.desc(), "Duplicated SKU");
}

#[tokio::test]
async fn test_product_validation_errors() {
    let app = TestApp::new().await;
    let response = app
        .post(
            "/api/products",
            json!({ "name": "X", "sku": "bad sku!", "price": -1.0, "quantity": 0 }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "14");
    let fields: Vec<&str> = response
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "price", "sku"]);
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "14");
    assert!(response.data().is_string());
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let app = TestApp::new().await;
    let response = app.get("/api/products/does-not-exist").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.code(), "13");
    assert_eq!(response.desc(), "Product not found");
}

#[tokio::test]
async fn test_pagination_and_filters() {
    let app = TestApp::new().await;
    for i in 0..12 {
        app.create_product(&format!("PG-{i:03}"), 1.0, 1).await;
    }
    app.post(
        "/api/products",
        json!({ "name": "Desk Lamp", "sku": "LAMP-1", "price": 20.0, "quantity": 3, "category": "lighting" }),
    )
    .await;

    let response = app.get("/api/products?page=2&page_size=5").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["products"].as_array().unwrap().len(), 5);
    assert_eq!(
        response.data()["pagination"],
        json!({ "page": 2, "page_size": 5, "total": 13, "pages": 3 })
    );

    // 非法分页参数回退为默认值
    let response = app.get("/api/products?page=0&page_size=1000").await;
    assert_eq!(response.data()["pagination"]["page"], 1);
    assert_eq!(response.data()["pagination"]["page_size"], 10);

    let response = app.get("/api/products?category=lighting").await;
    assert_eq!(response.data()["pagination"]["total"], 1);

    let response = app.get("/api/products?search=lamp").await;
    assert_eq!(response.data()["products"][0]["sku"], "LAMP-1");

    let response = app.get("/api/products?search=nothing-matches").await;
    assert_eq!(response.data()["pagination"]["total"], 0);
    assert_eq!(response.data()["pagination"]["pages"], 1);
}

#[tokio::test]
async fn test_update_product_reports_changed_fields() {
    let app = TestApp::new().await;
    let id = app.create_product("UPD-1", 10.0, 5).await;

    let response = app
        .put(
            &format!("/api/products/{id}"),
            json!({ "price": 12.5, "quantity": 5, "category": "" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.desc(), "Product updated successfully");
    assert_eq!(response.data()["updated_fields"], json!(["price"]));
    assert_eq!(response.data()["product"]["price"], 12.5);

    let response = app
        .put(&format!("/api/products/{id}"), json!({ "price": 12.5 }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.desc(), "No changes detected");

    let stored = app.get(&format!("/api/products/{id}")).await;
    assert_eq!(stored.data()["price"], 12.5);
    assert_eq!(stored.data()["category"], "hardware");
}

#[tokio::test]
async fn test_update_to_existing_sku_is_duplicate() {
    let app = TestApp::new().await;
    app.create_product("TAKEN-1", 1.0, 1).await;
    let id = app.create_product("FREE-1", 1.0, 1).await;

    let response = app
        .put(&format!("/api/products/{id}"), json!({ "sku": "TAKEN-1" }))
        .await;
    assert_eq!(response.code(), "15");
}

#[tokio::test]
async fn test_delete_product() {
    let app = TestApp::new().await;
    let id = app.create_product("DEL-1", 1.0, 1).await;

    let response = app.delete(&format!("/api/products/{id}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.get("responseData").is_none());

    let response = app.delete(&format!("/api/products/{id}")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_customer_crud() {
    let app = TestApp::new().await;
    let response = app
        .post(
            "/api/customers",
            json!({
                "name": "Grace Hopper",
                "email": "grace@example.com",
                "phone": "+1 (555) 010-2030",
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.data()["id"].as_str().unwrap().to_string();

    let response = app
        .post(
            "/api/customers",
            json!({ "name": "Other", "email": "grace@example.com" }),
        )
        .await;
    assert_eq!(response.code(), "15");
    assert_eq!(response.desc(), "Duplicate email");

    let response = app
        .get("/api/customers?email=GRACE@example.com")
        .await;
    assert_eq!(response.data()["pagination"]["total"], 1);

    let response = app
        .put(&format!("/api/customers/{id}"), json!({ "address": "Arlington, VA" }))
        .await;
    assert_eq!(response.data()["updated_fields"], json!(["address"]));

    let response = app.get("/api/customers/list").await;
    assert_eq!(response.data().as_array().unwrap().len(), 1);

    let response = app.delete(&format!("/api/customers/{id}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.get(&format!("/api/customers/{id}")).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_customer_phone_validation() {
    let app = TestApp::new().await;
    let response = app
        .post(
            "/api/customers",
            json!({ "name": "Short Phone", "email": "short@example.com", "phone": "123" }),
        )
        .await;

    assert_eq!(response.code(), "14");
    assert_eq!(response.data()[0]["field"], "phone");
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let app = TestApp::new().await;
    app.create_product("PG-001", 1.0, 1).await;
    app.create_customer().await;

    let response = app
        .get("/api/products?page=9223372036854775807&page_size=10")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["products"].as_array().unwrap().is_empty());
    assert_eq!(response.data()["pagination"]["page"], i64::MAX);
    assert_eq!(response.data()["pagination"]["total"], 1);

    let response = app
        .get("/api/customers?page=9223372036854775807&page_size=100")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_search_wildcards_match_literally() {
    let app = TestApp::new().await;
    app.post(
        "/api/products",
        json!({ "name": "Cotton 100% Shirt", "sku": "SHIRT-1", "price": 15.0, "quantity": 5 }),
    )
    .await;
    app.post(
        "/api/products",
        json!({ "name": "Cotton 1000 Towel", "sku": "TOWEL-1", "price": 9.0, "quantity": 5 }),
    )
    .await;
    app.post(
        "/api/products",
        json!({ "name": "Steel Bolt", "sku": "BOLT-A1", "price": 0.5, "quantity": 5 }),
    )
    .await;

    let response = app.get("/api/products?search=100%25").await;
    assert_eq!(response.data()["pagination"]["total"], 1);
    assert_eq!(response.data()["products"][0]["sku"], "SHIRT-1");

    let response = app.get("/api/products?search=T_A").await;
    assert_eq!(response.data()["pagination"]["total"], 0);
}
