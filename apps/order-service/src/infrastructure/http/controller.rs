//! HTTP Controller (Driver Adapter)
//!
//! Axum router exposing CRUD over orders. Handlers are generic over the
//! repository port, so the same router serves every storage backend.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Path, State,
        rejection::{BytesRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::domain::order::{Order, OrderId, OrderRepository};
use crate::observability::record_request;

use super::error::ApiError;
use super::request::OrderPayload;
use super::response::{ApiErrorResponse, HealthResponse, MessageResponse};

/// Application state shared across handlers.
pub struct AppState<O>
where
    O: OrderRepository,
{
    /// Order repository.
    pub order_repo: Arc<O>,
    /// Application version.
    pub version: String,
}

impl<O> AppState<O>
where
    O: OrderRepository,
{
    /// Create state around a repository.
    pub fn new(order_repo: Arc<O>, version: impl Into<String>) -> Self {
        Self {
            order_repo,
            version: version.into(),
        }
    }
}

impl<O> Clone for AppState<O>
where
    O: OrderRepository,
{
    fn clone(&self) -> Self {
        Self {
            order_repo: Arc::clone(&self.order_repo),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<O>(state: AppState<O>) -> Router
where
    O: OrderRepository + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/order", post(create_order))
        .route("/orders", get(list_orders))
        .route(
            "/order/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Path extraction result for routes carrying `{id}`.
type IdPath = Result<Path<String>, PathRejection>;

/// Body extraction result for routes carrying a JSON payload.
type RawBody = Result<Bytes, BytesRejection>;

/// Resolve the `{id}` segment. Undecodable segments and non-numeric ids are
/// both client errors.
fn order_id(path: IdPath) -> Result<OrderId, ApiError> {
    let Path(raw_id) = path?;
    Ok(raw_id.parse::<OrderId>()?)
}

/// Read and decode the request body.
fn order_payload(body: RawBody) -> Result<OrderPayload, ApiError> {
    let bytes = body?;
    Ok(OrderPayload::from_json(&bytes)?)
}

/// Render a handler outcome and record it.
fn finish<T: Serialize>(
    operation: &'static str,
    started: Instant,
    success: StatusCode,
    result: Result<T, ApiError>,
) -> Response {
    let response = match result {
        Ok(body) => (success, Json(body)).into_response(),
        Err(err) => err.into_response(),
    };
    record_request(operation, response.status().as_u16(), started.elapsed());
    response
}

/// Health check endpoint.
async fn health_check<O>(State(state): State<AppState<O>>) -> Response
where
    O: OrderRepository,
{
    let started = Instant::now();
    let (status, body) = match state.order_repo.ping().await {
        Ok(()) => (
            StatusCode::OK,
            HealthResponse {
                status: "healthy".to_string(),
                version: state.version.clone(),
                error: None,
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                HealthResponse {
                    status: "unhealthy".to_string(),
                    version: state.version.clone(),
                    error: Some(e.to_string()),
                },
            )
        }
    };
    record_request("health", status.as_u16(), started.elapsed());
    (status, Json(body)).into_response()
}

/// `POST /order`
async fn create_order<O>(State(state): State<AppState<O>>, body: RawBody) -> Response
where
    O: OrderRepository,
{
    let started = Instant::now();
    let result = match order_payload(body) {
        Ok(payload) => state
            .order_repo
            .create(payload.into())
            .await
            .map_err(ApiError::from),
        Err(e) => Err(e),
    };
    if let Ok(order) = &result {
        tracing::info!(order_id = %order.id, "order created");
    }
    finish("create", started, StatusCode::CREATED, result)
}

/// `GET /orders`
async fn list_orders<O>(State(state): State<AppState<O>>) -> Response
where
    O: OrderRepository,
{
    let started = Instant::now();
    let result = state.order_repo.find_all().await.map_err(ApiError::from);
    finish("list", started, StatusCode::OK, result)
}

/// `GET /order/{id}`
async fn get_order<O>(State(state): State<AppState<O>>, path: IdPath) -> Response
where
    O: OrderRepository,
{
    let started = Instant::now();
    let result = match order_id(path) {
        Ok(id) => state
            .order_repo
            .find_by_id(id)
            .await
            .map_err(ApiError::from),
        Err(e) => Err(e),
    };
    finish("get", started, StatusCode::OK, result)
}

/// `PUT /order/{id}`
///
/// Replaces title and status wholesale. An invalid id is reported before an
/// invalid body.
async fn update_order<O>(
    State(state): State<AppState<O>>,
    path: IdPath,
    body: RawBody,
) -> Response
where
    O: OrderRepository,
{
    let started = Instant::now();
    let result = match (order_id(path), order_payload(body)) {
        (Ok(id), Ok(payload)) => state
            .order_repo
            .update(Order::from_draft(id, payload.into()))
            .await
            .map_err(ApiError::from),
        (Err(e), _) | (_, Err(e)) => Err(e),
    };
    if let Ok(order) = &result {
        tracing::info!(order_id = %order.id, "order updated");
    }
    finish("update", started, StatusCode::OK, result)
}

/// `DELETE /order/{id}`
async fn delete_order<O>(State(state): State<AppState<O>>, path: IdPath) -> Response
where
    O: OrderRepository,
{
    let started = Instant::now();
    let result = match order_id(path) {
        Ok(id) => state
            .order_repo
            .delete(id)
            .await
            .map(|()| {
                tracing::info!(order_id = %id, "order deleted");
                MessageResponse::deleted()
            })
            .map_err(ApiError::from),
        Err(e) => Err(e),
    };
    finish("delete", started, StatusCode::OK, result)
}

async fn route_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ApiErrorResponse::new("not found"))).into_response()
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiErrorResponse::new("method not allowed")),
    )
        .into_response()
}
