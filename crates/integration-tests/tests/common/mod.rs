//! Shared helpers for database-backed tests
//!
//! Tests marked `#[ignore = "requires database"]` read `DB_*` variables:
//!
//! ```text
//! DB_HOST=localhost DB_USER=postgres DB_PASSWORD=... DB_NAME=postgres \
//!     cargo test -p pgstarter-integration-tests -- --ignored
//! ```

#![allow(dead_code)]

use async_trait::async_trait;
use pgstarter_core::application::Database;
use pgstarter_core::domain::QueryResult;
use pgstarter_core::port::{
    Connection, ConnectionPool, DriverError, LifecycleEvent, LifecycleLog, Outcome,
};
use pgstarter_infra_postgres::{DbConfig, PgConnectionPool};
use std::sync::{Arc, Mutex};

/// Lifecycle sink keeping `(event, failure reason)` in order
#[derive(Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<(LifecycleEvent, Option<String>)>>,
}

impl RecordingLog {
    pub fn entries(&self) -> Vec<(LifecycleEvent, Option<String>)> {
        self.entries.lock().unwrap().clone()
    }
}

impl LifecycleLog for RecordingLog {
    fn record(&self, event: LifecycleEvent, outcome: Outcome<'_>) {
        let reason = match outcome {
            Outcome::Succeeded => None,
            Outcome::Failed(r) => Some(r.to_string()),
        };
        self.entries.lock().unwrap().push((event, reason));
    }
}

/// Wraps a real pool and records every statement its connections send
pub struct CountingPool {
    inner: PgConnectionPool,
    pub sent: Arc<Mutex<Vec<String>>>,
}

impl CountingPool {
    pub fn new(inner: PgConnectionPool) -> Self {
        Self {
            inner,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

struct CountingConnection {
    inner: Box<dyn Connection>,
    sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ConnectionPool for CountingPool {
    async fn acquire(&self) -> Result<Box<dyn Connection>, DriverError> {
        let inner = self.inner.acquire().await?;
        Ok(Box::new(CountingConnection {
            inner,
            sent: self.sent.clone(),
        }))
    }
}

#[async_trait]
impl Connection for CountingConnection {
    async fn execute(&mut self, sql: &str) -> Result<(), DriverError> {
        self.sent.lock().unwrap().push(sql.to_string());
        self.inner.execute(sql).await
    }

    async fn fetch_all(&mut self, sql: &str) -> Result<QueryResult, DriverError> {
        self.sent.lock().unwrap().push(sql.to_string());
        self.inner.fetch_all(sql).await
    }

    fn discard(&mut self) {
        self.inner.discard();
    }
}

pub fn env_config() -> DbConfig {
    DbConfig::from_env().expect("DB_* environment variables are invalid")
}

/// Database over the env-configured server, plus its statement log
pub fn counting_database() -> (Database, Arc<Mutex<Vec<String>>>, Arc<RecordingLog>) {
    let pool = CountingPool::new(PgConnectionPool::from_config(&env_config()));
    let sent = pool.sent.clone();
    let log = Arc::new(RecordingLog::default());
    (Database::new(Arc::new(pool), log.clone()), sent, log)
}
