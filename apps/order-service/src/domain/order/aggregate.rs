//! Order entity.

use serde::{Deserialize, Serialize};

use super::identifiers::OrderId;

/// Client-supplied fields of an order, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Free-form title.
    pub title: String,
    /// Status flag.
    pub status: bool,
}

impl OrderDraft {
    /// Create a new draft.
    #[must_use]
    pub fn new(title: impl Into<String>, status: bool) -> Self {
        Self {
            title: title.into(),
            status,
        }
    }
}

/// A persisted order.
///
/// Values are request-scoped copies of a row; the store stays the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned id.
    pub id: OrderId,
    /// Free-form title.
    pub title: String,
    /// Status flag.
    pub status: bool,
}

impl Order {
    /// Combine a store-assigned id with draft fields.
    #[must_use]
    pub fn from_draft(id: OrderId, draft: OrderDraft) -> Self {
        Self {
            id,
            title: draft.title,
            status: draft.status,
        }
    }

    /// Replace every mutable field with the draft's values.
    pub fn apply(&mut self, draft: OrderDraft) {
        self.title = draft.title;
        self.status = draft.status;
    }

    /// The mutable fields as a draft.
    #[must_use]
    pub fn to_draft(&self) -> OrderDraft {
        OrderDraft {
            title: self.title.clone(),
            status: self.status,
        }
    }
}
