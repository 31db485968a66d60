//! Process configuration (everything except database credentials)

use anyhow::{Context, Result};
use chrono_tz::Tz;
use pgstarter_api_rpc::RpcServerConfig;
use pgstarter_core::application::{QueryFailureRollback, RollbackPolicy};
use pgstarter_core::domain::timestamp::{parse_timezone, DEFAULT_TIMEZONE};

#[derive(Debug)]
pub struct AppConfig {
    pub timezone: Tz,
    pub rpc: RpcServerConfig,
    pub rollback_policy: RollbackPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timezone = match lookup("APP_TIMEZONE") {
            Some(name) => parse_timezone(&name)?,
            None => DEFAULT_TIMEZONE,
        };

        let mut rpc = RpcServerConfig::default();
        if let Some(host) = lookup("APP_RPC_HOST") {
            rpc.host = host;
        }
        if let Some(port) = lookup("APP_RPC_PORT") {
            rpc.port = port
                .parse()
                .with_context(|| format!("APP_RPC_PORT must be a port number, got {:?}", port))?;
        }

        // Defaults: roll back after every failed query, never after a failed commit
        let on_query_failure = match lookup("DB_ROLLBACK_ON_QUERY_FAILURE").as_deref() {
            None | Some("always") => QueryFailureRollback::Always,
            Some("when_open") => QueryFailureRollback::WhenOpen,
            Some(other) => anyhow::bail!(
                "DB_ROLLBACK_ON_QUERY_FAILURE must be `always` or `when_open`, got {:?}",
                other
            ),
        };
        let rollback_on_commit_failure = lookup("DB_ROLLBACK_ON_COMMIT_FAILURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            timezone,
            rpc,
            rollback_policy: RollbackPolicy {
                on_query_failure,
                rollback_on_commit_failure,
            },
        })
    }
}
