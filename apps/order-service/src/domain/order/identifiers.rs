//! Strongly-typed identifier for orders.
//!
//! Order ids are assigned by the store (auto-increment) and arrive from
//! clients only as a path segment, so parsing is strict: ASCII digits only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::OrderError;

/// Store-assigned identifier of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Wrap a raw store id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value for binding into statements.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OrderId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for OrderId {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OrderError::Validation(format!(
                "invalid order id '{s}': expected a positive integer"
            )));
        }

        s.parse::<i64>().map(Self).map_err(|e| {
            OrderError::Validation(format!("invalid order id '{s}': {e}"))
        })
    }
}
