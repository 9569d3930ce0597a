//! SQLite order repository.
//!
//! Embedded adapter for local development and for running the service's SQL
//! against a real engine in tests.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::{debug, info};

use super::storage_error;
use crate::config::DatabaseConfig;
use crate::domain::order::{Order, OrderDraft, OrderError, OrderId, OrderRepository};

const CREATE_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        status BOOLEAN NOT NULL
    )
";

/// `OrderRepository` backed by a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    /// Open (creating if missing) the database file named in `config`.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the parent directory or database cannot be created.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, OrderError> {
        let path = Path::new(&config.sqlite_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                OrderError::Storage(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            // Prevent transient "database is locked" errors under concurrent access.
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_with(options)
            .await
            .map_err(storage_error)?;

        info!(
            path = %config.sqlite_path,
            max_connections = config.max_connections,
            "SQLite connection pool initialized"
        );

        Ok(Self { pool })
    }

    /// Open a private in-memory database with the schema already created.
    ///
    /// The pool holds exactly one connection that is never recycled, since an
    /// in-memory database lives only as long as its connection.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the database cannot be opened.
    pub async fn in_memory() -> Result<Self, OrderError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::new())
            .await
            .map_err(storage_error)?;

        let repo = Self { pool };
        repo.ensure_schema().await?;
        Ok(repo)
    }

    /// Create a repository with an existing pool (for testing).
    #[must_use]
    pub const fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `orders` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the DDL fails.
    pub async fn ensure_schema(&self) -> Result<(), OrderError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        debug!("orders table ensured");
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn row_to_order(row: &SqliteRow) -> Result<Order, OrderError> {
        Ok(Order {
            id: OrderId::new(row.try_get::<i64, _>("id").map_err(storage_error)?),
            title: row.try_get::<String, _>("title").map_err(storage_error)?,
            status: row.try_get::<bool, _>("status").map_err(storage_error)?,
        })
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn create(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        let result = sqlx::query("INSERT INTO orders (title, status) VALUES (?, ?)")
            .bind(&draft.title)
            .bind(draft.status)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        let order = Order::from_draft(OrderId::new(result.last_insert_rowid()), draft);

        debug!(order_id = %order.id, "order inserted");
        Ok(order)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Order, OrderError> {
        let row = sqlx::query("SELECT id, title, status FROM orders WHERE id = ?")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref()
            .map_or_else(|| Err(OrderError::not_found(id)), Self::row_to_order)
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let rows = sqlx::query("SELECT id, title, status FROM orders ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter().map(Self::row_to_order).collect()
    }

    async fn update(&self, order: Order) -> Result<Order, OrderError> {
        let result = sqlx::query("UPDATE orders SET title = ?, status = ? WHERE id = ?")
            .bind(&order.title)
            .bind(order.status)
            .bind(order.id.value())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        debug!(
            order_id = %order.id,
            rows_affected = result.rows_affected(),
            "order updated"
        );

        if result.rows_affected() == 0 {
            return Err(OrderError::not_found(order.id));
        }
        Ok(order)
    }

    async fn delete(&self, id: OrderId) -> Result<(), OrderError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        debug!(order_id = %id, rows_affected = result.rows_affected(), "order deleted");

        if result.rows_affected() == 0 {
            return Err(OrderError::not_found(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), OrderError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }
}
