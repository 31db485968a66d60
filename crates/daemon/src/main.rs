//! pgstarter - Main Entry Point
//!
//! Composition root: owns the single `Database` for the process and hands it
//! to request handlers through `AppState`.

mod config;
mod telemetry;

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

use config::AppConfig;
use pgstarter_api_rpc::rate_limiter::RateLimiter;
use pgstarter_api_rpc::RpcServer;
use pgstarter_core::application::AppState;
use pgstarter_core::port::time_provider::SystemTimeProvider;
use pgstarter_core::port::TracingLifecycleLog;
use pgstarter_infra_postgres::{build_database, DbConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env (optional) and initialize logging
    let dotenv = dotenvy::dotenv();
    telemetry::init_logging()?;

    info!("pgstarter v{} starting...", VERSION);
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(e) => debug!(error = %e, "No .env loaded"),
    }

    // 2. Load configuration
    let app_config = AppConfig::from_env()?;
    let db_config = DbConfig::from_env()?;

    info!(
        host = ?db_config.host,
        database = ?db_config.database,
        timezone = %app_config.timezone,
        "Initializing database..."
    );

    // 3. Build the one Database handle (no network yet)
    let lifecycle_log = Arc::new(TracingLifecycleLog::new(
        Arc::new(SystemTimeProvider),
        app_config.timezone,
    ));
    let database =
        build_database(&db_config, lifecycle_log).with_policy(app_config.rollback_policy);
    debug!(policy = ?database.policy(), "Rollback policy");

    // 4. Verify connectivity; the outcome is already logged by the database.
    // The pool keeps retrying on later checkouts, so startup continues.
    if database.connect().await.is_err() {
        warn!("Starting without a verified database connection");
    }

    // 5. Start JSON-RPC server
    let state = AppState::new(database);
    let rpc_server = RpcServer::new(app_config.rpc, state, RateLimiter::from_env()?);
    let (addr, rpc_handle) = rpc_server.start().await?;

    info!(addr = %addr, "System ready. Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    info!("Shutdown complete.");

    Ok(())
}
