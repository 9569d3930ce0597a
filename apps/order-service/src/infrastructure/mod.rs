//! Infrastructure Layer
//!
//! Adapters for the ports defined in the domain layer:
//!
//! - **Driven (outbound)**: `persistence/` implements `OrderRepository` for
//!   MySQL, SQLite and process memory.
//! - **Driver (inbound)**: `http/` exposes the repository as a REST API.

pub mod http;
pub mod persistence;
