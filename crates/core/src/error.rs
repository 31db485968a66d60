// Central Error Type for the data-access layer

use crate::domain::ControlOp;
use thiserror::Error;

/// Failure kinds surfaced by `Database` and `Session`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transaction {op} failed: {message}")]
    TransactionControl { op: ControlOp, message: String },

    #[error("Query execution failed: {0}")]
    QueryExecution(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Discriminant of `DbError`, for callers that only branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    TransactionControl,
    QueryExecution,
    Config,
}

impl DbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::Connection(_) => ErrorKind::Connection,
            DbError::TransactionControl { .. } => ErrorKind::TransactionControl,
            DbError::QueryExecution(_) => ErrorKind::QueryExecution,
            DbError::Config(_) => ErrorKind::Config,
        }
    }

    /// Driver-level reason without the kind prefix
    pub fn reason(&self) -> &str {
        match self {
            DbError::Connection(msg)
            | DbError::QueryExecution(msg)
            | DbError::Config(msg)
            | DbError::TransactionControl { message: msg, .. } => msg,
        }
    }
}

/// Result type alias using DbError
pub type Result<T> = std::result::Result<T, DbError>;
