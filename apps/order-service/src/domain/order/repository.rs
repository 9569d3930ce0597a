//! Order Repository Trait
//!
//! Defines the persistence abstraction for orders.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::aggregate::{Order, OrderDraft};
use super::errors::OrderError;
use super::identifiers::OrderId;

/// Repository trait for Order persistence.
///
/// This is a domain interface (port) that is implemented by
/// infrastructure adapters (MySQL, SQLite, in-memory).
///
/// Every operation is a single statement against the store. There is no
/// locking; concurrent writers to the same id resolve as last-writer-wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order and return it with its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the insert fails.
    async fn create(&self, draft: OrderDraft) -> Result<Order, OrderError>;

    /// Find an order by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no row matches, `Storage` if the query fails.
    async fn find_by_id(&self, id: OrderId) -> Result<Order, OrderError>;

    /// List every order, ordered by id. An empty table yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the query fails.
    async fn find_all(&self) -> Result<Vec<Order>, OrderError>;

    /// Replace title and status of the row with `order.id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no row matches, `Storage` if the update fails.
    async fn update(&self, order: Order) -> Result<Order, OrderError>;

    /// Hard-delete the row with `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no row matches, `Storage` if the delete fails.
    async fn delete(&self, id: OrderId) -> Result<(), OrderError>;

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the store cannot be queried.
    async fn ping(&self) -> Result<(), OrderError>;
}
