//! JSON-RPC Server
//!
//! JSON-RPC 2.0 over HTTP with permissive CORS, matching the template's
//! `/api/**` route rules.

use crate::error::ServerError;
use crate::handler::RpcHandler;
use crate::rate_limiter::RateLimiter;
use crate::types::{METHOD_HEALTH, METHOD_SAMPLE_LIST};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use pgstarter_core::application::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 3000;

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, state: AppState, rate_limiter: RateLimiter) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(state, rate_limiter)),
        }
    }

    /// Bind, register methods and start serving
    ///
    /// Returns the bound address (useful with port 0) and the stop handle.
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), ServerError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let middleware = tower::ServiceBuilder::new().layer(CorsLayer::permissive());
        let server = Server::builder()
            .set_http_middleware(middleware)
            .build(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = server.local_addr().map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

        let mut module = RpcModule::new(());

        let handler = self.handler.clone();
        module
            .register_async_method(METHOD_SAMPLE_LIST, move |_params, _, _| {
                let handler = handler.clone();
                async move { handler.sample_list().await }
            })
            .map_err(|e| ServerError::Register {
                method: METHOD_SAMPLE_LIST,
                message: e.to_string(),
            })?;

        let handler = self.handler.clone();
        module
            .register_async_method(METHOD_HEALTH, move |_params, _, _| {
                let handler = handler.clone();
                async move { handler.health().await }
            })
            .map_err(|e| ServerError::Register {
                method: METHOD_HEALTH,
                message: e.to_string(),
            })?;

        info!(addr = %local_addr, "JSON-RPC server started");

        Ok((local_addr, server.start(module)))
    }
}
