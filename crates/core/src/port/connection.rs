// Connection Pool Port (Interface)

use crate::domain::QueryResult;
use async_trait::async_trait;
use thiserror::Error;

/// Error reported by the database driver, reduced to its message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DriverError {
    pub message: String,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Pool of physical connections
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionPool: Send + Sync {
    /// Check out a dedicated connection (returned to the pool on drop)
    async fn acquire(&self) -> Result<Box<dyn Connection>, DriverError>;
}

/// One checked-out physical connection
#[async_trait]
pub trait Connection: Send {
    /// Run a statement that returns no rows (BEGIN/COMMIT/ROLLBACK)
    async fn execute(&mut self, sql: &str) -> Result<(), DriverError>;

    /// Run a statement and decode every returned row
    async fn fetch_all(&mut self, sql: &str) -> Result<QueryResult, DriverError>;

    /// Close the connection on drop instead of returning it to the pool
    fn discard(&mut self);
}
