//! 可观测性模块集成测试
//!
//! 测试 metrics、middleware 与配置的核心功能。

// ============================================================================
// 指标记录测试
// ============================================================================

mod metrics_tests {
    use erp_shared::observability::metrics::{record_http_request, record_order_placement};

    #[test]
    fn test_record_http_request() {
        record_http_request("GET", "/api/products", 200, 0.05);
        record_http_request("POST", "/api/orders", 201, 0.12);
        record_http_request("PUT", "/api/products/{id}", 200, 0.08);
        record_http_request("DELETE", "/api/customers/{id}", 200, 0.03);
        record_http_request("GET", "/api/products/{id}", 404, 0.01);
        record_http_request("POST", "/api/orders", 500, 0.25);
    }

    #[test]
    fn test_record_order_placement() {
        record_order_placement("created", 3, 0.02);
        record_order_placement("rejected", 1, 0.01);
        record_order_placement("failed", 2, 1.5);
    }

    #[test]
    fn test_metrics_with_edge_cases() {
        // 空字符串
        record_http_request("", "", 0, 0.0);

        // 超长路径
        let long_path = "/api/".to_string() + &"x".repeat(1000);
        record_http_request("GET", &long_path, 200, 0.01);

        // 零行订单
        record_order_placement("rejected", 0, 0.000001);
    }
}

// ============================================================================
// 中间件测试
// ============================================================================

mod middleware_tests {
    use axum::{Router, body::Body, http::Request, middleware, routing::get};
    use erp_shared::observability::middleware::{REQUEST_ID_HEADER, RequestId, http_tracing, request_id};
    use tower::ServiceExt;

    #[test]
    fn test_request_id_creation() {
        let id = RequestId("test-id-123".to_string());
        assert_eq!(id.as_str(), "test-id-123");
        assert!(format!("{:?}", id.clone()).contains("test-id-123"));
    }

    #[tokio::test]
    async fn test_tracing_passes_status_through() {
        let app = Router::new()
            .route(
                "/missing",
                get(|| async { (axum::http::StatusCode::NOT_FOUND, "nope") }),
            )
            .layer(middleware::from_fn(http_tracing))
            .layer(middleware::from_fn(request_id));

        let response = app
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }
}

// ============================================================================
// 配置测试
// ============================================================================

mod config_tests {
    use erp_shared::config::{AppConfig, IN_MEMORY_SQLITE_URL};
    use erp_shared::observability::ObservabilityConfig;

    #[test]
    fn test_default_observability_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.service_name, "erp-api");
        assert_eq!(config.metrics_port, 9090);
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs());
    }

    #[test]
    fn test_custom_observability_config() {
        let config = ObservabilityConfig {
            service_name: "erp-worker".to_string(),
            log_level: "debug".to_string(),
            log_format: "JSON".to_string(),
            metrics_enabled: true,
            metrics_port: 9091,
        };

        assert!(config.json_logs());
        assert_eq!(config.with_service_name("erp-api").service_name, "erp-api");
    }

    #[test]
    fn test_in_memory_flag_switches_database() {
        let mut config = AppConfig::default();
        config.apply_platform_overrides(|key| (key == "IN_MEMORY_DB").then(|| "true".to_string()));
        assert_eq!(config.database.url, IN_MEMORY_SQLITE_URL);
    }
}

// ============================================================================
// Guard 测试
// ============================================================================

mod guard_tests {
    use erp_shared::observability::ObservabilityGuard;

    #[test]
    fn test_empty_guard() {
        let guard = ObservabilityGuard::empty();
        drop(guard);
    }
}
