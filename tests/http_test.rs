use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use product_catalog::api::{router, AppState, CatalogService};
use product_catalog::lifecycle::{CatalogConfig, CatalogSystem};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> (CatalogSystem, Router) {
    let system = CatalogSystem::new(&CatalogConfig::default()).expect("Failed to start system");
    let service = CatalogService::new(system.product_client.clone());
    (system, router(Arc::new(AppState::new(service))))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_list_scenario_over_http() {
    let (_system, app) = app();

    let (status, body) = send(&app, Method::GET, "/products?minPrice=50&limit=5&page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 5);
    assert_eq!(body["total"], 17);
    let ids: Vec<u64> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![19, 20, 21, 22, 23]);
    assert_eq!(body["products"][0]["inStock"], false);
}

#[tokio::test]
async fn test_status_codes_over_http() {
    let (_system, app) = app();

    let (status, body) = send(&app, Method::GET, "/products?minPrice=9&maxPrice=1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "minPrice cannot be greater than maxPrice" }));

    let (status, body) = send(&app, Method::GET, "/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid id" }));

    let (status, body) = send(&app, Method::GET, "/products/0x1e", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["name"], "Product 30");

    let (status, body) = send(&app, Method::GET, "/products/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Product not found" }));

    let new_product = json!({ "name": "Kite", "price": 12.5, "category": "Kids", "inStock": true });
    let (status, body) = send(&app, Method::POST, "/products", Some(new_product)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["product"]["id"], 31);
    assert_eq!(body["product"]["price"], 12.5);

    let (status, body) = send(&app, Method::PATCH, "/products/31", Some(json!({ "price": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Price must be a positive number" }));

    let (status, body) = send(&app, Method::PATCH, "/products/31", Some(json!({ "name": " Box Kite " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["name"], "Box Kite");
    assert_eq!(body["product"]["category"], "Kids");

    let (status, body) = send(&app, Method::DELETE, "/products/31", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, "/products/31", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn test_invalid_json_body() {
    let (_system, app) = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "Invalid JSON" }));
}

#[tokio::test]
async fn test_stats_count_requests() {
    let (_system, app) = app();

    send(&app, Method::GET, "/products", None).await;
    send(&app, Method::GET, "/products/1", None).await;
    let (status, body) = send(&app, Method::GET, "/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalRequests"], 3);
    assert_eq!(body["productsCount"], 30);
    assert!(body["lastRequestTime"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_undecodable_id_segment_is_json_400() {
    let (_system, app) = app();

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, method, "/products/%FF", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid id" }));
    }

    let (status, body) = send(&app, Method::PATCH, "/products/%FF", Some(json!({ "inStock": true }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid id" }));
}

#[tokio::test]
async fn test_malformed_body_for_missing_product_is_invalid_json() {
    let (_system, app) = app();

    for method in [Method::PATCH, Method::PUT] {
        let request = Request::builder()
            .method(method)
            .uri("/products/999")
            .header("content-type", "application/json")
            .body(Body::from("{bad"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Invalid JSON" }));
    }
}

#[tokio::test]
async fn test_unsupported_method_is_json_405() {
    let (_system, app) = app();

    let (status, body) = send(&app, Method::POST, "/products/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "error": "Method not allowed" }));

    let (status, body) = send(&app, Method::DELETE, "/products", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "error": "Method not allowed" }));
}
