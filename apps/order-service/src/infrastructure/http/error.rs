//! Mapping of domain errors and extractor rejections onto HTTP responses.

use axum::Json;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::response::ApiErrorResponse;
use crate::domain::order::OrderError;

/// An error on its way out of a handler. Always rendered as
/// `{"error": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    /// Failure reported by the domain or a repository.
    Order(OrderError),
    /// The request could not be extracted (undecodable path, body over the
    /// size limit). Keeps the status axum chose.
    Request {
        /// Status from the rejection.
        status: StatusCode,
        /// Rejection message.
        message: String,
    },
}

impl ApiError {
    /// Status code for the error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Order(OrderError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Order(OrderError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Order(OrderError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Request { status, .. } => *status,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Order(err) => err.to_string(),
            Self::Request { message, .. } => message.clone(),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        Self::Order(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Request {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::Request {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        match &self {
            Self::Order(err) if err.is_client_error() => {
                tracing::debug!(%status, error = %message, "rejected request");
            }
            Self::Order(_) => {
                tracing::error!(error = %message, "storage failure");
            }
            Self::Request { .. } => {
                tracing::warn!(%status, error = %message, "unreadable request");
            }
        }

        (status, Json(ApiErrorResponse::new(message))).into_response()
    }
}
