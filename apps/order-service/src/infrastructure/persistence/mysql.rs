//! MySQL order repository.
//!
//! Production adapter. Every statement is parameterized; user input is only
//! ever bound, never formatted into SQL.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use tracing::{debug, info};

use super::storage_error;
use crate::config::DatabaseConfig;
use crate::domain::order::{Order, OrderDraft, OrderError, OrderId, OrderRepository};

const CREATE_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS orders (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        title TEXT NOT NULL,
        status BOOLEAN NOT NULL
    )
";

/// `OrderRepository` backed by a MySQL connection pool.
#[derive(Debug, Clone)]
pub struct MySqlOrderRepository {
    pool: MySqlPool,
}

impl MySqlOrderRepository {
    /// Connect to the server described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the pool cannot establish a connection.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, OrderError> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_with(options)
            .await
            .map_err(storage_error)?;

        info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            max_connections = config.max_connections,
            "MySQL connection pool initialized"
        );

        Ok(Self { pool })
    }

    /// Create a repository with an existing pool (for testing).
    #[must_use]
    pub const fn with_pool(pool: MySqlPool) -> Self {
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

    async fn exists(&self, id: OrderId) -> Result<bool, OrderError> {
        let row = sqlx::query("SELECT 1 FROM orders WHERE id = ?")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(row.is_some())
    }

    fn row_to_order(row: &MySqlRow) -> Result<Order, OrderError> {
        Ok(Order {
            id: OrderId::new(row.try_get::<i64, _>("id").map_err(storage_error)?),
            title: row.try_get::<String, _>("title").map_err(storage_error)?,
            status: row.try_get::<bool, _>("status").map_err(storage_error)?,
        })
    }
}

#[async_trait]
impl OrderRepository for MySqlOrderRepository {
    async fn create(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        let result = sqlx::query("INSERT INTO orders (title, status) VALUES (?, ?)")
            .bind(&draft.title)
            .bind(draft.status)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        let id = i64::try_from(result.last_insert_id()).map_err(|e| {
            OrderError::Storage(format!("generated id out of range: {e}"))
        })?;
        let order = Order::from_draft(OrderId::new(id), draft);

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

        // MySQL counts changed rows, not matched rows: rewriting identical
        // values reports zero for an existing id.
        if result.rows_affected() == 0 && !self.exists(order.id).await? {
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
