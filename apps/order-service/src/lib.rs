// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Order Service - Rust Core Library
//!
//! CRUD over a single `orders` table, served as JSON over HTTP.
//!
//! # Architecture (Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: the `Order` entity, `OrderId`, `OrderError` and the
//!   `OrderRepository` port.
//!
//! - **Infrastructure**: adapters
//!   - `persistence`: MySQL, SQLite and in-memory repositories
//!   - `http`: axum router, DTOs and error rendering
//!
//! - **Config** / **Observability**: YAML configuration, logging, metrics.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// YAML configuration with environment interpolation.
pub mod config;

/// Domain layer - entity, errors and repository port.
pub mod domain;

/// Infrastructure layer - storage and HTTP adapters.
pub mod infrastructure;

/// Logging and Prometheus metrics.
pub mod observability;

pub use config::{Config, ConfigError, DatabaseBackend, load_config, load_config_or_default};
pub use domain::order::{Order, OrderDraft, OrderError, OrderId, OrderRepository};
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::{
    InMemoryOrderRepository, MySqlOrderRepository, SqliteOrderRepository,
};
