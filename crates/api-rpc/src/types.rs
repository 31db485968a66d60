//! RPC Request/Response Types

use serde::{Deserialize, Serialize};

pub use pgstarter_core::domain::ResponseEnvelope;

/// sample.list.v1 - no parameters; answers with a `ResponseEnvelope`
pub const METHOD_SAMPLE_LIST: &str = "sample.list.v1";

/// admin.health.v1 - database connectivity probe
pub const METHOD_HEALTH: &str = "admin.health.v1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub database: String,
    pub version: String,
    pub uptime_seconds: u64,
}
