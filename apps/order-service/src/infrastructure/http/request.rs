//! HTTP request DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::order::{OrderDraft, OrderError};

/// Body of `POST /order` and `PUT /order/{id}`.
///
/// Both fields are required. Unknown fields, including any client-supplied
/// `id`, are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Order title.
    pub title: String,
    /// Order status flag.
    pub status: bool,
}

impl OrderPayload {
    /// Decode a raw request body.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the body is not a JSON object with a string
    /// `title` and a boolean `status`.
    pub fn from_json(body: &[u8]) -> Result<Self, OrderError> {
        serde_json::from_slice(body)
            .map_err(|e| OrderError::Validation(format!("invalid order payload: {e}")))
    }
}

impl From<OrderPayload> for OrderDraft {
    fn from(payload: OrderPayload) -> Self {
        Self::new(payload.title, payload.status)
    }
}
