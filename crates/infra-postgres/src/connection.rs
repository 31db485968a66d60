// PostgreSQL Connection Pool Setup

use crate::config::DbConfig;
use crate::row::row_to_map;
use async_trait::async_trait;
use pgstarter_core::domain::QueryResult;
use pgstarter_core::port::{Connection, ConnectionPool, DriverError};
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Executor, Postgres};
use tracing::debug;

/// Create a lazy pool: no connection is opened until the first checkout
pub fn create_pool(config: &DbConfig) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(config.connect_options())
}

/// `ConnectionPool` port backed by `sqlx::PgPool`
#[derive(Clone)]
pub struct PgConnectionPool {
    pool: PgPool,
}

impl PgConnectionPool {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn from_config(config: &DbConfig) -> Self {
        Self::new(create_pool(config))
    }
}

#[async_trait]
impl ConnectionPool for PgConnectionPool {
    async fn acquire(&self) -> Result<Box<dyn Connection>, DriverError> {
        let conn = self.pool.acquire().await.map_err(to_driver_error)?;
        Ok(Box::new(PgPooledConnection::new(conn)))
    }
}

/// One checked-out connection; returned to the pool on drop unless discarded
pub struct PgPooledConnection {
    conn: Option<PoolConnection<Postgres>>,
    discard: bool,
}

impl PgPooledConnection {
    pub fn new(conn: PoolConnection<Postgres>) -> Self {
        Self {
            conn: Some(conn),
            discard: false,
        }
    }

    fn conn(&mut self) -> Result<&mut PoolConnection<Postgres>, DriverError> {
        self.conn
            .as_mut()
            .ok_or_else(|| DriverError::new("connection already released"))
    }
}

#[async_trait]
impl Connection for PgPooledConnection {
    async fn execute(&mut self, sql: &str) -> Result<(), DriverError> {
        let conn = self.conn()?;
        (&mut **conn)
            .execute(sql)
            .await
            .map_err(to_driver_error)?;
        Ok(())
    }

    /// Plain `&str` without bind arguments goes over the simple-query
    /// protocol: nothing is prepared or cached, several `;`-separated
    /// statements are accepted (their rows are concatenated) and values come
    /// back in text format.
    async fn fetch_all(&mut self, sql: &str) -> Result<QueryResult, DriverError> {
        let conn = self.conn()?;
        let rows = (&mut **conn)
            .fetch_all(sql)
            .await
            .map_err(to_driver_error)?;

        debug!(rows = rows.len(), "Fetched rows");
        Ok(rows.iter().map(row_to_map).collect())
    }

    fn discard(&mut self) {
        self.discard = true;
    }
}

impl Drop for PgPooledConnection {
    fn drop(&mut self) {
        if !self.discard {
            return;
        }
        if let Some(conn) = self.conn.take() {
            // Detached connections close on drop instead of going back to the pool
            drop(conn.detach());
        }
    }
}

/// Server errors keep only the server's message; others use sqlx's text
pub(crate) fn to_driver_error(err: sqlx::Error) -> DriverError {
    match err.as_database_error() {
        Some(db_err) => DriverError::new(db_err.message()),
        None => DriverError::new(err.to_string()),
    }
}
