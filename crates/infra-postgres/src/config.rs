// Database configuration from the environment

use pgstarter_core::error::{DbError, Result};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::fmt;
use std::time::Duration;

pub const ENV_USER: &str = "DB_USER";
pub const ENV_HOST: &str = "DB_HOST";
pub const ENV_NAME: &str = "DB_NAME";
pub const ENV_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_PORT: &str = "DB_PORT";
pub const ENV_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
pub const ENV_ACQUIRE_TIMEOUT_SECS: &str = "DB_ACQUIRE_TIMEOUT_SECS";

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Connection settings; unset credentials fall back to the driver's defaults
#[derive(Clone)]
pub struct DbConfig {
    pub user: Option<String>,
    pub host: Option<String>,
    pub database: Option<String>,
    pub password: Option<String>,
    pub port: Option<u16>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            user: None,
            host: None,
            database: None,
            password: None,
            port: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

// Keeps the password out of logs
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("user", &self.user)
            .field("host", &self.host)
            .field("database", &self.database)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl DbConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            user: get(ENV_USER),
            host: get(ENV_HOST),
            database: get(ENV_NAME),
            password: get(ENV_PASSWORD),
            port: get(ENV_PORT)
                .map(|v| parse_number::<u16>(ENV_PORT, &v))
                .transpose()?,
            max_connections: get(ENV_MAX_CONNECTIONS)
                .map(|v| parse_number::<u32>(ENV_MAX_CONNECTIONS, &v))
                .transpose()?
                .unwrap_or(defaults.max_connections),
            acquire_timeout: get(ENV_ACQUIRE_TIMEOUT_SECS)
                .map(|v| parse_number::<u64>(ENV_ACQUIRE_TIMEOUT_SECS, &v))
                .transpose()?
                .map(Duration::from_secs)
                .unwrap_or(defaults.acquire_timeout),
        })
    }

    /// TLS is always requested; the server certificate is not verified
    pub fn connect_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new().ssl_mode(PgSslMode::Require);

        if let Some(host) = &self.host {
            options = options.host(host);
        }
        if let Some(port) = self.port {
            options = options.port(port);
        }
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(database) = &self.database {
            options = options.database(database);
        }

        options
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| DbError::Config(format!("{} must be numeric, got {:?}", key, value)))
}
