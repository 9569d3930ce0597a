//! Order Service Binary
//!
//! Serves CRUD over the `orders` table.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-service
//! ```
//!
//! # Environment Variables
//!
//! ## Required (MySQL backend)
//! - `DB_USER_NAME`: Database user
//! - `DB_PASSWORD`: Database password
//! - `DB_NAME`: Database name
//!
//! ## Optional
//! - `DB_HOST`: Database host (default: localhost)
//! - `ORDER_SERVICE_CONFIG`: Path to the YAML config (default: config.yaml)
//! - `ORDER_SERVICE_DB_BACKEND`: mysql | sqlite | memory (default: mysql)
//! - `ORDER_SERVICE_SQLITE_PATH`: SQLite file (default: ./data/orders.db)
//! - `ORDER_SERVICE_LOG_FORMAT`: pretty | json (default: pretty)
//! - `RUST_LOG`: Log filter, overrides the configured level

use std::sync::Arc;

use anyhow::Context;
use order_service::config::{Config, DEFAULT_CONFIG_PATH, DatabaseBackend};
use order_service::infrastructure::http::{AppState, create_router};
use order_service::infrastructure::persistence::{
    InMemoryOrderRepository, MySqlOrderRepository, SqliteOrderRepository,
};
use order_service::observability::{init_metrics, init_tracing};
use order_service::{OrderRepository, load_config_or_default};
use tokio::net::TcpListener;
use tokio::signal;

/// Environment variable naming the config file.
const CONFIG_PATH_ENV: &str = "ORDER_SERVICE_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_ancestors();

    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config_or_default(&config_path)
        .with_context(|| format!("failed to load configuration from {config_path}"))?;

    init_tracing(&config.observability.logging).context("failed to initialize logging")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting order service");
    log_config(&config);

    if config.observability.metrics.enabled {
        init_metrics(&config.observability.metrics).context("failed to start metrics exporter")?;
    }

    match config.database.backend {
        DatabaseBackend::Mysql => {
            let repo = MySqlOrderRepository::connect(&config.database)
                .await
                .context("failed to connect to MySQL")?;
            if config.database.ensure_schema {
                repo.ensure_schema()
                    .await
                    .context("failed to create orders table")?;
            }
            let repo = Arc::new(repo);
            serve(&config, Arc::clone(&repo)).await?;
            repo.close().await;
        }
        DatabaseBackend::Sqlite => {
            let repo = SqliteOrderRepository::connect(&config.database)
                .await
                .context("failed to open SQLite database")?;
            if config.database.ensure_schema {
                repo.ensure_schema()
                    .await
                    .context("failed to create orders table")?;
            }
            let repo = Arc::new(repo);
            serve(&config, Arc::clone(&repo)).await?;
            repo.close().await;
        }
        DatabaseBackend::Memory => {
            tracing::warn!("using in-memory store; orders are lost on restart");
            serve(&config, Arc::new(InMemoryOrderRepository::new())).await?;
        }
    }

    tracing::info!("Order service stopped");
    Ok(())
}

/// Log the effective configuration. The password is never logged.
fn log_config(config: &Config) {
    tracing::info!(
        bind_address = %config.server.bind_address,
        http_port = config.server.http_port,
        backend = config.database.backend.as_str(),
        max_connections = config.database.max_connections,
        acquire_timeout_secs = config.database.acquire_timeout_secs,
        ensure_schema = config.database.ensure_schema,
        metrics_enabled = config.observability.metrics.enabled,
        "Configuration loaded"
    );
}

/// Bind the listener and serve until a shutdown signal arrives.
async fn serve<O>(config: &Config, repo: Arc<O>) -> anyhow::Result<()>
where
    O: OrderRepository + 'static,
{
    let app = create_router(AppState::new(repo, env!("CARGO_PKG_VERSION")));

    let addr = config.server.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health");
    tracing::info!("  POST   /order");
    tracing::info!("  GET    /orders");
    tracing::info!("  GET    /order/{{id}}");
    tracing::info!("  PUT    /order/{{id}}");
    tracing::info!("  DELETE /order/{{id}}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv_from_ancestors() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed; the process could not
/// otherwise respond to termination.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, draining in-flight requests");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, draining in-flight requests");
        }
    }
}
