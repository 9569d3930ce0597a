//! HTTP/REST API adapter.
//!
//! Inbound adapter mapping each route onto one repository operation.

mod controller;
mod error;
mod request;
mod response;

pub use controller::{AppState, create_router};
pub use error::ApiError;
pub use request::OrderPayload;
pub use response::{ApiErrorResponse, HealthResponse, MessageResponse};
