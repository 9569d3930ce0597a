//! Order Bounded Context
//!
//! The single `Order` entity, its identifier, its error taxonomy and the
//! repository port through which every persistence operation flows.

pub mod aggregate;
pub mod errors;
pub mod identifiers;
pub mod repository;

pub use aggregate::{Order, OrderDraft};
pub use errors::OrderError;
pub use identifiers::OrderId;
pub use repository::OrderRepository;

#[cfg(test)]
pub use repository::MockOrderRepository;
