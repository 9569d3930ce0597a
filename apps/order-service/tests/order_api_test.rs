//! End-to-end tests: HTTP router over the SQLite adapter.
//!
//! Every test gets a private in-memory database, so SQL, row mapping and
//! status codes are exercised together without external services.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use order_service::infrastructure::http::{ApiErrorResponse, MessageResponse};
use order_service::{AppState, Order, OrderId, SqliteOrderRepository, create_router};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let repo = SqliteOrderRepository::in_memory().await.unwrap();
    create_router(AppState::new(Arc::new(repo), "test"))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn full_lifecycle() {
    let app = app().await;

    let response = send(
        &app,
        "POST",
        "/order",
        Some(json!({"title": "widget", "status": false})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Order = read_json(response).await;
    assert_eq!(created.title, "widget");
    assert!(!created.status);

    let uri = format!("/order/{}", created.id);

    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Order = read_json(response).await;
    assert_eq!(fetched, created);

    let response = send(
        &app,
        "PUT",
        &uri,
        Some(json!({"title": "widget-v2", "status": true})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Order = read_json(response).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "widget-v2");
    assert!(updated.status);

    let response = send(&app, "GET", &uri, None).await;
    let fetched: Order = read_json(response).await;
    assert_eq!(fetched, updated);

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let message: MessageResponse = read_json(response).await;
    assert_eq!(message.message, "deleted successfully");

    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ApiErrorResponse = read_json(response).await;
    assert_eq!(error.error, format!("order {} not found", created.id));
}

#[tokio::test]
async fn list_reflects_creates_and_deletes() {
    let app = app().await;

    let response = send(&app, "GET", "/orders", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let orders: Vec<Order> = read_json(response).await;
    assert!(orders.is_empty());

    for title in ["a", "b", "c"] {
        let response = send(
            &app,
            "POST",
            "/order",
            Some(json!({"title": title, "status": false})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    send(&app, "DELETE", "/order/2", None).await;

    let orders: Vec<Order> = read_json(send(&app, "GET", "/orders", None).await).await;
    let titles: Vec<&str> = orders.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(titles, ["a", "c"]);
    assert_eq!(orders[1].id, OrderId::new(3));
}

#[tokio::test]
async fn client_supplied_id_is_ignored() {
    let app = app().await;

    let response = send(
        &app,
        "POST",
        "/order",
        Some(json!({"id": 500, "title": "widget", "status": true})),
    )
    .await;
    let created: Order = read_json(response).await;

    assert_eq!(created.id, OrderId::new(1));
    assert_eq!(
        send(&app, "GET", "/order/500", None).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn malformed_json_inserts_nothing() {
    let app = app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/order")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": \"widget\""))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let orders: Vec<Order> = read_json(send(&app, "GET", "/orders", None).await).await;
    assert!(orders.is_empty());
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let app = app().await;

    let response = send(&app, "GET", "/order/abc", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ApiErrorResponse = read_json(response).await;
    assert!(error.error.contains("abc"));
}

#[tokio::test]
async fn update_and_delete_of_missing_order_are_not_found() {
    let app = app().await;

    let response = send(
        &app,
        "PUT",
        "/order/77",
        Some(json!({"title": "ghost", "status": true})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", "/order/77", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let orders: Vec<Order> = read_json(send(&app, "GET", "/orders", None).await).await;
    assert!(orders.is_empty());
}

#[tokio::test]
async fn deleted_id_is_not_reused() {
    let app = app().await;

    let first: Order = read_json(
        send(
            &app,
            "POST",
            "/order",
            Some(json!({"title": "first", "status": false})),
        )
        .await,
    )
    .await;
    send(&app, "DELETE", &format!("/order/{}", first.id), None).await;

    let second: Order = read_json(
        send(
            &app,
            "POST",
            "/order",
            Some(json!({"title": "second", "status": false})),
        )
        .await,
    )
    .await;

    assert!(second.id > first.id);
}

#[tokio::test]
async fn health_reports_version() {
    let app = app().await;

    let response = send(&app, "GET", "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body, json!({"status": "healthy", "version": "test"}));
}
