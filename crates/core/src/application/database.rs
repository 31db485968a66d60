// Connection Manager
//
// Owns the process-wide pool. Construction never touches the network;
// `connect()` proves connectivity and `session()` checks out a dedicated
// connection for one logical request.

use super::session::Session;
use crate::error::{DbError, Result};
use crate::port::{ConnectionPool, LifecycleEvent, LifecycleLog, Outcome};
use std::sync::Arc;

/// Rollback attempted after a failed `query`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryFailureRollback {
    /// Issue ROLLBACK whatever the session state is
    #[default]
    Always,
    /// Issue ROLLBACK only while a transaction is known to be open
    WhenOpen,
}

/// Compensating actions taken by a session on failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RollbackPolicy {
    pub on_query_failure: QueryFailureRollback,
    /// Issue ROLLBACK after a failed COMMIT (off by default)
    pub rollback_on_commit_failure: bool,
}

/// Shared database handle
pub struct Database {
    pool: Arc<dyn ConnectionPool>,
    log: Arc<dyn LifecycleLog>,
    policy: RollbackPolicy,
}

impl Database {
    pub fn new(pool: Arc<dyn ConnectionPool>, log: Arc<dyn LifecycleLog>) -> Self {
        Self {
            pool,
            log,
            policy: RollbackPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RollbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RollbackPolicy {
        self.policy
    }

    /// Verify connectivity by checking out (and returning) one connection
    ///
    /// The handle stays usable after a failure; later checkouts retry.
    pub async fn connect(&self) -> Result<()> {
        match self.pool.acquire().await {
            Ok(_conn) => {
                self.log.record(LifecycleEvent::Connect, Outcome::Succeeded);
                Ok(())
            }
            Err(e) => {
                self.log
                    .record(LifecycleEvent::Connect, Outcome::Failed(&e.message));
                Err(DbError::Connection(e.message))
            }
        }
    }

    /// Check out a dedicated connection for one begin..commit/rollback cycle
    pub async fn session(&self) -> Result<Session> {
        let conn = self.pool.acquire().await.map_err(|e| {
            self.log
                .record(LifecycleEvent::Connect, Outcome::Failed(&e.message));
            DbError::Connection(e.message)
        })?;

        Ok(Session::new(conn, self.log.clone(), self.policy))
    }
}
