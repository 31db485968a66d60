// Lifecycle Log Port
//
// Every connect/begin/commit/rollback/query outcome is reported here exactly
// once, stamped with a localized `YYYY-MM-DD HH:mm:ss` time.

use crate::domain::timestamp::{format_local, DEFAULT_TIMEZONE};
use crate::port::TimeProvider;
use chrono_tz::Tz;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Connect,
    Begin,
    Commit,
    Rollback,
    Query,
}

impl LifecycleEvent {
    fn success_message(&self) -> &'static str {
        match self {
            LifecycleEvent::Connect => "DB connection established",
            LifecycleEvent::Begin => "Transaction started",
            LifecycleEvent::Commit => "Transaction committed",
            LifecycleEvent::Rollback => "Transaction rolled back",
            LifecycleEvent::Query => "Query executed",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            LifecycleEvent::Connect => "DB connection failed",
            LifecycleEvent::Begin => "Transaction start failed",
            LifecycleEvent::Commit => "Transaction commit failed",
            LifecycleEvent::Rollback => "Transaction rollback failed",
            LifecycleEvent::Query => "Query execution failed",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleEvent::Connect => "connect",
            LifecycleEvent::Begin => "begin",
            LifecycleEvent::Commit => "commit",
            LifecycleEvent::Rollback => "rollback",
            LifecycleEvent::Query => "query",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    Succeeded,
    Failed(&'a str),
}

/// Sink for lifecycle outcomes
pub trait LifecycleLog: Send + Sync {
    fn record(&self, event: LifecycleEvent, outcome: Outcome<'_>);
}

/// Production sink: one `tracing` event per outcome
pub struct TracingLifecycleLog {
    time_provider: Arc<dyn TimeProvider>,
    timezone: Tz,
}

impl TracingLifecycleLog {
    pub fn new(time_provider: Arc<dyn TimeProvider>, timezone: Tz) -> Self {
        Self {
            time_provider,
            timezone,
        }
    }

    pub fn with_default_timezone(time_provider: Arc<dyn TimeProvider>) -> Self {
        Self::new(time_provider, DEFAULT_TIMEZONE)
    }
}

impl LifecycleLog for TracingLifecycleLog {
    fn record(&self, event: LifecycleEvent, outcome: Outcome<'_>) {
        let at = format_local(self.time_provider.now_millis(), self.timezone);
        match outcome {
            Outcome::Succeeded => {
                info!(at = %at, event = %event, "{}", event.success_message());
            }
            Outcome::Failed(reason) => {
                error!(at = %at, event = %event, error = %reason, "{}", event.failure_message());
            }
        }
    }
}
