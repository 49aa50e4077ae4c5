//! 供应商、仓库、库位与库存接口集成测试

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_supplier_crud_and_duplicate_code() {
    let app = TestApp::new().await;
    let id = app.create_supplier("SUP-01").await;

    let response = app
        .post("/api/suppliers", json!({ "name": "Copycat", "code": "SUP-01" }))
        .await;
    assert_eq!(response.code(), "15");
    assert_eq!(response.desc(), "Duplicate supplier code");

    let response = app.get(&format!("/api/suppliers/{id}")).await;
    assert_eq!(response.data()["status"], "active");

    let response = app
        .put(&format!("/api/suppliers/{id}"), json!({ "status": "archived" }))
        .await;
    assert_eq!(response.code(), "14");

    let response = app
        .put(
            &format!("/api/suppliers/{id}"),
            json!({ "status": "inactive", "payment_terms": "Net 30" }),
        )
        .await;
    assert_eq!(response.desc(), "Supplier updated successfully");
    assert_eq!(response.data()["updated_fields"], json!(["payment_terms", "status"]));

    let response = app.delete(&format!("/api/suppliers/{id}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["deleted_supplier_id"], id.as_str());
    assert!(app.get("/api/suppliers").await.data().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_product_supplier_links() {
    let app = TestApp::new().await;
    let product = app.create_product("LINK-1", 30.0, 5).await;
    let acme = app.create_supplier("ACME").await;
    let globex = app.create_supplier("GLOBEX").await;

    let response = app
        .post(
            &format!("/api/suppliers/{acme}/products"),
            json!({ "product_id": product, "cost_price": 12.5, "lead_time_days": 7 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(response.data()["supplier_code"], "ACME");
    assert_eq!(response.data()["is_primary"], false);
    let acme_link = response.data()["id"].as_str().unwrap().to_string();

    let response = app
        .post(
            &format!("/api/suppliers/{globex}/products"),
            json!({ "product_id": product, "cost_price": 11.0, "is_primary": true }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app
        .post(
            &format!("/api/suppliers/{acme}/products"),
            json!({ "product_id": product, "cost_price": 9.0 }),
        )
        .await;
    assert_eq!(response.code(), "15");
    assert_eq!(response.desc(), "Duplicate product-supplier");

    let response = app
        .post(
            &format!("/api/suppliers/{acme}/products"),
            json!({ "product_id": "missing", "cost_price": 9.0 }),
        )
        .await;
    assert_eq!(response.code(), "10");
    assert_eq!(response.desc(), "Invalid product ID");

    // 首选供应商排在前面
    let response = app.get(&format!("/api/products/{product}/suppliers")).await;
    assert_eq!(response.data()["count"], 2);
    assert_eq!(response.data()["suppliers"][0]["supplier_code"], "GLOBEX");
    assert_eq!(response.data()["suppliers"][0]["is_primary"], true);

    let response = app.get(&format!("/api/suppliers/{acme}/products")).await;
    assert_eq!(response.data()["products"][0]["product_sku"], "LINK-1");

    // 关联只能从所属供应商下删除
    let response = app
        .delete(&format!("/api/suppliers/{globex}/products/{acme_link}"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .delete(&format!("/api/suppliers/{acme}/products/{acme_link}"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        app.get(&format!("/api/products/{product}/suppliers")).await.data()["count"],
        1
    );
}

#[tokio::test]
async fn test_warehouse_locations() {
    let app = TestApp::new().await;
    let warehouse = app.create_warehouse("WH-01").await;

    let response = app
        .post("/api/warehouses", json!({ "code": "WH-01", "name": "Duplicate" }))
        .await;
    assert_eq!(response.desc(), "Duplicate warehouse code");

    for (code, zone, row) in [("B-01", "B", 1), ("A-02", "A", 2), ("A-01", "A", 1)] {
        let response = app
            .post(
                &format!("/api/warehouses/{warehouse}/locations"),
                json!({ "location_code": code, "zone": zone, "row_number": row, "max_capacity": 10 }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        assert_eq!(response.data()["status"], "available");
        assert_eq!(response.data()["current_quantity"], 0);
    }

    let response = app
        .post(
            &format!("/api/warehouses/{warehouse}/locations"),
            json!({ "location_code": "A-01" }),
        )
        .await;
    assert_eq!(response.desc(), "Duplicate location code");

    let response = app.get(&format!("/api/warehouses/{warehouse}/locations")).await;
    let codes: Vec<&str> = response.data()["locations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["location_code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["A-01", "A-02", "B-01"]);

    let location_id = response.data()["locations"][0]["id"].as_str().unwrap().to_string();
    let response = app
        .put(
            &format!("/api/warehouses/{warehouse}/locations/{location_id}"),
            json!({ "status": "maintenance" }),
        )
        .await;
    assert_eq!(response.data()["updated_fields"], json!(["status"]));

    let response = app
        .get(&format!("/api/warehouses/{warehouse}/locations/available"))
        .await;
    assert_eq!(response.data()["count"], 2);

    let response = app.get("/api/warehouses/missing/locations").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.desc(), "Warehouse not found");
}

#[tokio::test]
async fn test_inventory_lifecycle() {
    let app = TestApp::new().await;
    let warehouse = app.create_warehouse("WH-INV").await;
    let other = app.create_warehouse("WH-OTHER").await;
    let product = app.create_product("INV-1", 3.0, 0).await;

    let response = app
        .post(
            &format!("/api/warehouses/{other}/locations"),
            json!({ "location_code": "X-01" }),
        )
        .await;
    let foreign_location = response.data()["id"].as_str().unwrap().to_string();

    let response = app
        .post(
            &format!("/api/warehouses/{warehouse}/inventory"),
            json!({ "product_id": product, "location_id": foreign_location, "quantity": 5 }),
        )
        .await;
    assert_eq!(response.desc(), "Invalid location ID");

    let response = app
        .post(
            &format!("/api/warehouses/{warehouse}/inventory"),
            json!({ "product_id": product, "quantity": 5 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(response.data()["min_quantity"], 10);
    assert_eq!(response.data()["available_quantity"], 5);
    assert_eq!(response.data()["product_name"], "Product INV-1");
    let inventory_id = response.data()["id"].as_str().unwrap().to_string();

    let response = app.get(&format!("/api/warehouses/{warehouse}/inventory")).await;
    assert_eq!(response.data()["summary"]["total_items"], 1);
    assert_eq!(response.data()["summary"]["total_quantity"], 5);
    assert_eq!(response.data()["summary"]["low_stock_items"], 1);

    let response = app
        .put(&format!("/api/inventory/{inventory_id}"), json!({ "quantity": 40 }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["inventory"]["available_quantity"], 40);
    assert!(response.data()["inventory"]["last_restocked"].is_string());

    let response = app
        .put(&format!("/api/inventory/{inventory_id}"), json!({ "quantity": -1 }))
        .await;
    assert_eq!(response.code(), "14");

    let response = app.get(&format!("/api/products/{product}/inventory")).await;
    assert_eq!(response.data()["summary"]["total_available"], 40);
    assert_eq!(response.data()["inventory"][0]["warehouse_name"], "Warehouse WH-INV");

    let response = app.delete(&format!("/api/warehouses/{warehouse}")).await;
    assert_eq!(response.data()["deleted_warehouse_name"], "Warehouse WH-INV");
    assert_eq!(
        app.get(&format!("/api/products/{product}/inventory")).await.data()["summary"]["total_items"],
        0
    );
}

#[tokio::test]
async fn test_system_endpoints() {
    let app = TestApp::new().await;

    let response = app.get("/").await;
    assert_eq!(response.code(), "00");

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "healthy");
    assert_eq!(response.data()["database"], "sqlite");

    app.create_product("DBG-1", 1.0, 1).await;
    let response = app.get("/debug/db").await;
    assert_eq!(response.data()["tables"]["products"], 1);
    assert_eq!(response.data()["tables"]["orders"], 0);
}
