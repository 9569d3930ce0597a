//! Order errors.

use thiserror::Error;

use super::identifiers::OrderId;

/// Errors that can occur while handling orders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Malformed identifier or payload supplied by the caller.
    #[error("{0}")]
    Validation(String),

    /// No row matches the referenced id.
    #[error("order {id} not found")]
    NotFound {
        /// Order ID.
        id: OrderId,
    },

    /// Connectivity, constraint, or query failure in the store.
    #[error("storage error: {0}")]
    Storage(String),
}

impl OrderError {
    /// Build a not-found error for an id.
    #[must_use]
    pub const fn not_found(id: OrderId) -> Self {
        Self::NotFound { id }
    }

    /// Whether the error was caused by the caller's input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound { .. })
    }
}
