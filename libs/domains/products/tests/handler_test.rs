//! Handler tests for Products domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! They run against the in-memory repository, so no database is needed.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt; // For oneshot()

fn app() -> axum::Router {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo);
    handlers::router(service)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_create_product_handler_returns_200_with_record() {
    let app = app();

    let response = app
        .oneshot(post_json(
            "/",
            json!({"label": "Keyboard", "categoryId": "c1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.label, "Keyboard");
    assert_eq!(product.category_id.as_deref(), Some("c1"));
    assert_eq!(product.id.len(), 20);
}

#[tokio::test]
async fn test_create_product_handler_accepts_null_category() {
    let app = app();

    let response = app
        .oneshot(post_json("/", json!({"label": "Mouse", "categoryId": null})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert!(product.category_id.is_none());
}

#[tokio::test]
async fn test_create_product_handler_rejects_oversized_label() {
    let app = app();

    let response = app
        .oneshot(post_json(
            "/",
            json!({"label": "x".repeat(257), "categoryId": null}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_product_handler_returns_404_for_missing() {
    let app = app();

    let request = Request::builder()
        .method("GET")
        .uri("/does-not-exist")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_product_handler_replaces_fields() {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo);

    let created = service
        .create_product(CreateProduct {
            label: "old".to_string(),
            category_id: Some("c1".to_string()),
        })
        .await
        .unwrap();

    let app = handlers::router(service);

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/{}", created.id))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({"label": "new", "categoryId": null})).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.label, "new");
    assert!(product.category_id.is_none());
}

#[tokio::test]
async fn test_delete_product_handler_returns_200_then_404() {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo);

    let created = service
        .create_product(CreateProduct {
            label: "ephemeral".to_string(),
            category_id: None,
        })
        .await
        .unwrap();

    let app = handlers::router(service);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_products_handler_returns_all_records() {
    let repo = InMemoryProductRepository::new();
    let service = ProductService::new(repo);

    for label in ["a", "b", "c"] {
        service
            .create_product(CreateProduct {
                label: label.to_string(),
                category_id: None,
            })
            .await
            .unwrap();
    }

    let app = handlers::router(service);

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Product> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 3);
    assert_eq!(
        products.iter().map(|p| p.label.as_str()).collect::<Vec<_>>(),
        vec!["a", "b", "c"]
    );
}
