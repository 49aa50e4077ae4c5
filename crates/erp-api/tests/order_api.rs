//! 下单接口集成测试

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

async fn stock_of(app: &TestApp, product_id: &str) -> i64 {
    app.get(&format!("/api/products/{product_id}"))
        .await
        .data()["quantity"]
        .as_i64()
        .unwrap()
}

#[tokio::test]
async fn test_place_order_decrements_stock() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer().await;
    let mouse = app.create_product("MOUSE-1", 19.99, 10).await;
    let cable = app.create_product("CABLE-1", 0.1, 100).await;

    let response = app
        .post(
            "/api/orders",
            json!({
                "customer_id": customer_id,
                "items": [
                    { "product_id": mouse, "quantity": 3 },
                    { "product_id": cable, "quantity": 3 },
                ],
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(response.code(), "01");
    assert_eq!(response.desc(), "Order created successfully");

    let data = response.data();
    assert_eq!(data["order"]["status"], "pending");
    assert_eq!(data["order"]["customer_id"], customer_id.as_str());
    assert!(data["order"]["customer_name"].is_string());
    assert_eq!(data["order"]["total_amount"], 60.27);
    assert_eq!(data["summary"], json!({ "total_items": 2, "total_amount": 60.27 }));
    assert_eq!(data["items"][0]["total_price"], 59.97);
    assert_eq!(data["items"][1]["total_price"], 0.3);

    assert_eq!(stock_of(&app, &mouse).await, 7);
    assert_eq!(stock_of(&app, &cable).await, 97);

    let order_id = data["order"]["id"].as_str().unwrap().to_string();
    let items = app.get(&format!("/api/orders/{order_id}/items")).await;
    assert_eq!(items.status, StatusCode::OK);
    assert_eq!(items.data()["count"], 2);
    assert_eq!(items.data()["items"][0]["product_name"], "Product CABLE-1");

    let orders = app.get("/api/orders").await;
    assert_eq!(orders.data().as_array().unwrap().len(), 1);
    assert!(orders.data()[0]["customer_name"].is_string());
}

#[tokio::test]
async fn test_unknown_customer_is_rejected() {
    let app = TestApp::new().await;
    let product = app.create_product("P-1", 1.0, 5).await;

    let response = app
        .post(
            "/api/orders",
            json!({ "customer_id": "ghost", "items": [{ "product_id": product, "quantity": 1 }] }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "10");
    assert_eq!(response.desc(), "Invalid customer ID");
    assert_eq!(stock_of(&app, &product).await, 5);
}

#[tokio::test]
async fn test_insufficient_stock_rolls_back_everything() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer().await;
    let plenty = app.create_product("PLENTY-1", 2.0, 50).await;
    let scarce = app.create_product("SCARCE-1", 5.0, 4).await;

    // 同一商品分两行，累计数量超出库存
    let response = app
        .post(
            "/api/orders",
            json!({
                "customer_id": customer_id,
                "items": [
                    { "product_id": plenty, "quantity": 10 },
                    { "product_id": scarce, "quantity": 3 },
                    { "product_id": scarce, "quantity": 2 },
                ],
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.desc(), "Insufficient stock");
    assert_eq!(response.data()["product_id"], scarce.as_str());
    assert_eq!(response.data()["available"], 4);
    assert_eq!(response.data()["requested"], 5);

    assert_eq!(stock_of(&app, &plenty).await, 50);
    assert_eq!(stock_of(&app, &scarce).await, 4);
    assert!(app.get("/api/orders").await.data().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_order_amount_overflow_is_rejected() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer().await;
    let server = app.create_product("SERVER-1", 1.0e12, 100_000_000).await;

    let response = app
        .post(
            "/api/orders",
            json!({
                "customer_id": customer_id,
                "items": [{ "product_id": server, "quantity": 100_000_000 }],
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "10");
    assert_eq!(response.desc(), "Invalid order amount");
    assert_eq!(response.data()["product_id"], server.as_str());
    assert_eq!(stock_of(&app, &server).await, 100_000_000);
    assert!(app.get("/api/orders").await.data().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_product_is_rejected() {
    let app = TestApp::new().await;
    let customer_id = app.create_customer().await;

    let response = app
        .post(
            "/api/orders",
            json!({ "customer_id": customer_id, "items": [{ "product_id": "nope", "quantity": 1 }] }),
        )
        .await;

    assert_eq!(response.code(), "10");
    assert_eq!(response.desc(), "Invalid product ID");
    assert_eq!(response.data()["product_id"], "nope");
}

#[tokio::test]
async fn test_order_request_validation() {
    let app = TestApp::new().await;

    let response = app
        .post("/api/orders", json!({ "customer_id": "c1", "items": [] }))
        .await;
    assert_eq!(response.code(), "14");
    assert_eq!(response.data()[0]["field"], "items");

    let response = app
        .post(
            "/api/orders",
            json!({ "customer_id": "c1", "items": [{ "product_id": "p1", "quantity": 0 }] }),
        )
        .await;
    assert_eq!(response.code(), "14");
    assert_eq!(response.data()[0]["field"], "items[0].quantity");
}

#[tokio::test]
async fn test_items_of_unknown_order() {
    let app = TestApp::new().await;
    let response = app.get("/api/orders/missing/items").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.desc(), "Order not found");
}
