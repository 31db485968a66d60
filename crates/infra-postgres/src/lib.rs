// pgstarter Infrastructure - PostgreSQL Adapter
// Implements: ConnectionPool / Connection ports over sqlx

mod config;
mod connection;
mod row;

pub use config::DbConfig;
pub use connection::{create_pool, PgConnectionPool, PgPooledConnection};
pub use row::row_to_map;

use pgstarter_core::application::Database;
use pgstarter_core::port::LifecycleLog;
use std::sync::Arc;

/// Build the process-wide `Database` handle; opens no connection yet
pub fn build_database(config: &DbConfig, log: Arc<dyn LifecycleLog>) -> Database {
    Database::new(Arc::new(PgConnectionPool::from_config(config)), log)
}
