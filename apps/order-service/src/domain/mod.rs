//! Domain Layer
//!
//! The innermost layer with zero infrastructure dependencies. It defines the
//! order entity, its errors, and the repository trait implemented by adapters.
//!
//! # Bounded Contexts
//!
//! - [`order`]: Order record lifecycle (create, read, update, delete)

pub mod order;
