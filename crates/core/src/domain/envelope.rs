// API response envelope

use super::row::QueryResult;
use serde::{Deserialize, Serialize};

/// Message used when a failure carries no reason text
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

/// Envelope returned to HTTP/RPC consumers
///
/// A failed envelope never carries rows; `message` holds the reason.
/// `token` belongs to authenticated flows and is omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub data: Option<QueryResult>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl ResponseEnvelope {
    pub fn success(data: QueryResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: "success".to_string(),
            token: None,
        }
    }

    /// Failure envelope with an empty row set
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            data: Some(Vec::new()),
            message: if message.trim().is_empty() {
                UNKNOWN_ERROR_MESSAGE.to_string()
            } else {
                message
            },
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}
