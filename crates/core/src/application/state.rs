//! Application state shared across request handlers

use super::database::Database;
use std::sync::Arc;

/// Cheap-to-clone handle to the process-wide `Database`
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    database: Arc<Database>,
}

impl AppState {
    pub fn new(database: Database) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                database: Arc::new(database),
            }),
        }
    }

    /// Same instance on every call, from every clone
    pub fn database(&self) -> &Arc<Database> {
        &self.inner.database
    }
}
