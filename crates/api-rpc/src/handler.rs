//! RPC Method Handlers

use crate::error::{throttled, to_rpc_error};
use crate::rate_limiter::RateLimiter;
use crate::types::{HealthResponse, ResponseEnvelope};
use jsonrpsee::types::ErrorObjectOwned;
use pgstarter_core::application::sample_api::{self, SAMPLE_QUERY};
use pgstarter_core::application::AppState;
use std::time::Instant;
use tracing::warn;

/// RPC Handler with injected state
pub struct RpcHandler {
    state: AppState,
    rate_limiter: RateLimiter,
    start_time: Instant,
}

impl RpcHandler {
    pub fn new(state: AppState, rate_limiter: RateLimiter) -> Self {
        Self {
            state,
            rate_limiter,
            start_time: Instant::now(),
        }
    }

    /// sample.list.v1
    ///
    /// Database failures are reported inside the envelope, not as RPC errors.
    pub async fn sample_list(&self) -> Result<ResponseEnvelope, ErrorObjectOwned> {
        if !self.rate_limiter.check() {
            return Err(throttled());
        }

        let envelope = sample_api::execute(self.state.database(), SAMPLE_QUERY).await;
        if !envelope.success {
            warn!(message = %envelope.message, "Sample query failed");
        }

        Ok(envelope)
    }

    /// admin.health.v1
    pub async fn health(&self) -> Result<HealthResponse, ErrorObjectOwned> {
        self.state
            .database()
            .connect()
            .await
            .map_err(to_rpc_error)?;

        Ok(HealthResponse {
            database: "ok".to_string(),
            version: pgstarter_core::VERSION.to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        })
    }
}
