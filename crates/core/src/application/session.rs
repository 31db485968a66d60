// Transactional Query Service
//
// A session owns one checked-out connection, so its BEGIN..COMMIT/ROLLBACK
// sequence never interleaves with another request's commands.

use super::database::{QueryFailureRollback, RollbackPolicy};
use crate::domain::{ControlOp, QueryResult, TxState};
use crate::error::{DbError, Result};
use crate::port::{Connection, LifecycleEvent, LifecycleLog, Outcome};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Session {
    conn: Box<dyn Connection>,
    log: Arc<dyn LifecycleLog>,
    policy: RollbackPolicy,
    state: TxState,
}

impl Session {
    pub(crate) fn new(
        conn: Box<dyn Connection>,
        log: Arc<dyn LifecycleLog>,
        policy: RollbackPolicy,
    ) -> Self {
        Self {
            conn,
            log,
            policy,
            state: TxState::Idle,
        }
    }

    pub fn state(&self) -> TxState {
        self.state
    }

    /// Issue BEGIN
    pub async fn start_transaction(&mut self) -> Result<()> {
        self.control(ControlOp::Begin).await?;
        self.state = TxState::InTransaction;
        Ok(())
    }

    /// Issue COMMIT
    ///
    /// A failed COMMIT is only followed by ROLLBACK when
    /// `RollbackPolicy::rollback_on_commit_failure` is set.
    pub async fn commit(&mut self) -> Result<()> {
        match self.control(ControlOp::Commit).await {
            Ok(()) => {
                self.state = TxState::Committed;
                Ok(())
            }
            Err(err) => {
                if self.policy.rollback_on_commit_failure {
                    self.best_effort_rollback().await;
                }
                Err(err)
            }
        }
    }

    /// Issue ROLLBACK
    pub async fn rollback(&mut self) -> Result<()> {
        self.control(ControlOp::Rollback).await?;
        self.state = TxState::RolledBack;
        Ok(())
    }

    /// Execute one statement and return its rows untouched
    ///
    /// On failure the error is logged, a ROLLBACK is attempted according to
    /// the session's policy, and the original error is returned.
    pub async fn query(&mut self, sql: &str) -> Result<QueryResult> {
        match self.conn.fetch_all(sql).await {
            Ok(rows) => {
                self.log.record(LifecycleEvent::Query, Outcome::Succeeded);
                Ok(rows)
            }
            Err(e) => {
                self.log
                    .record(LifecycleEvent::Query, Outcome::Failed(&e.message));

                let rollback = match self.policy.on_query_failure {
                    QueryFailureRollback::Always => true,
                    QueryFailureRollback::WhenOpen => self.state.is_open(),
                };
                if rollback {
                    self.best_effort_rollback().await;
                }

                Err(DbError::QueryExecution(e.message))
            }
        }
    }

    async fn control(&mut self, op: ControlOp) -> Result<()> {
        let event = match op {
            ControlOp::Begin => LifecycleEvent::Begin,
            ControlOp::Commit => LifecycleEvent::Commit,
            ControlOp::Rollback => LifecycleEvent::Rollback,
        };

        match self.conn.execute(op.sql()).await {
            Ok(()) => {
                self.log.record(event, Outcome::Succeeded);
                Ok(())
            }
            Err(e) => {
                self.log.record(event, Outcome::Failed(&e.message));
                Err(DbError::TransactionControl {
                    op,
                    message: e.message,
                })
            }
        }
    }

    // Failure already logged by `control`; never propagated.
    async fn best_effort_rollback(&mut self) {
        if let Err(e) = self.rollback().await {
            debug!(error = %e, "Compensating rollback failed");
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.state.is_open() {
            warn!("Session dropped with an open transaction, discarding its connection");
            self.conn.discard();
        }
    }
}
