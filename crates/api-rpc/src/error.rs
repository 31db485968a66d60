//! RPC Error Types
//!
//! Maps data-access errors to JSON-RPC error codes.

use jsonrpsee::types::ErrorObjectOwned;
use pgstarter_core::error::{DbError, ErrorKind};
use thiserror::Error;

/// RPC Error Codes
pub mod code {
    pub const THROTTLED: i32 = 4003;
    pub const CONFIG_ERROR: i32 = 5000;
    pub const CONNECTION_ERROR: i32 = 5001;
    pub const TRANSACTION_ERROR: i32 = 5002;
    pub const QUERY_ERROR: i32 = 5003;
}

/// Failures while bringing the server up
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to build server on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to register method {method}: {message}")]
    Register { method: &'static str, message: String },

    #[error("Invalid value for {key}: {value:?} (expected a non-negative integer)")]
    InvalidSetting { key: &'static str, value: String },
}

/// Convert DbError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: DbError) -> ErrorObjectOwned {
    let code = match err.kind() {
        ErrorKind::Connection => code::CONNECTION_ERROR,
        ErrorKind::TransactionControl => code::TRANSACTION_ERROR,
        ErrorKind::QueryExecution => code::QUERY_ERROR,
        ErrorKind::Config => code::CONFIG_ERROR,
    };
    ErrorObjectOwned::owned(code, err.to_string(), None::<()>)
}

pub fn throttled() -> ErrorObjectOwned {
    ErrorObjectOwned::owned(
        code::THROTTLED,
        "Rate limit exceeded. Please slow down.",
        None::<()>,
    )
}
