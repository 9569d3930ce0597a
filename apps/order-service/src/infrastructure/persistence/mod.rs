//! Persistence Adapters
//!
//! Implementations of [`OrderRepository`](crate::domain::order::OrderRepository):
//!
//! - `mysql`: production store
//! - `sqlite`: embedded store for local runs and SQL-level tests
//! - `in_memory`: process-local store, nothing survives a restart

pub mod in_memory;
pub mod mysql;
pub mod sqlite;

pub use in_memory::InMemoryOrderRepository;
pub use mysql::MySqlOrderRepository;
pub use sqlite::SqliteOrderRepository;

use crate::domain::order::OrderError;

/// Map a driver error onto the domain's storage failure.
pub(crate) fn storage_error(err: sqlx::Error) -> OrderError {
    OrderError::Storage(err.to_string())
}
