// In-memory fakes of the ports, shared by unit tests

use super::database::Database;
use crate::domain::{QueryResult, QueryRow};
use crate::port::{Connection, ConnectionPool, DriverError, LifecycleEvent, LifecycleLog, Outcome};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted server: records every statement, fails the ones registered
#[derive(Default)]
pub struct FakeDb {
    commands: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, String>>,
    rows: Mutex<HashMap<String, QueryResult>>,
    acquire_error: Mutex<Option<String>>,
    acquired: AtomicUsize,
    discarded: AtomicUsize,
}

impl FakeDb {
    pub fn fail(&self, sql: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(sql.to_string(), message.to_string());
    }

    pub fn set_rows(&self, sql: &str, rows: QueryResult) {
        self.rows.lock().unwrap().insert(sql.to_string(), rows);
    }

    pub fn refuse_connections(&self, message: &str) {
        *self.acquire_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn count(&self, sql: &str) -> usize {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == sql)
            .count()
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn discarded(&self) -> usize {
        self.discarded.load(Ordering::SeqCst)
    }

    fn run(&self, sql: &str) -> Result<(), DriverError> {
        self.commands.lock().unwrap().push(sql.to_string());
        match self.failures.lock().unwrap().get(sql) {
            Some(message) => Err(DriverError::new(message.clone())),
            None => Ok(()),
        }
    }
}

pub struct FakePool(pub Arc<FakeDb>);

#[async_trait]
impl ConnectionPool for FakePool {
    async fn acquire(&self) -> Result<Box<dyn Connection>, DriverError> {
        if let Some(message) = self.0.acquire_error.lock().unwrap().clone() {
            return Err(DriverError::new(message));
        }
        self.0.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeConnection::new(self.0.clone())))
    }
}

pub struct FakeConnection {
    db: Arc<FakeDb>,
}

impl FakeConnection {
    pub fn new(db: Arc<FakeDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Connection for FakeConnection {
    async fn execute(&mut self, sql: &str) -> Result<(), DriverError> {
        self.db.run(sql)
    }

    async fn fetch_all(&mut self, sql: &str) -> Result<QueryResult, DriverError> {
        self.db.run(sql)?;
        Ok(self
            .db
            .rows
            .lock()
            .unwrap()
            .get(sql)
            .cloned()
            .unwrap_or_default())
    }

    fn discard(&mut self) {
        self.db.discarded.fetch_add(1, Ordering::SeqCst);
    }
}

/// Lifecycle sink that keeps `(event, failure reason)` pairs
#[derive(Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<(LifecycleEvent, Option<String>)>>,
}

impl RecordingLog {
    pub fn entries(&self) -> Vec<(LifecycleEvent, Option<String>)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, event: LifecycleEvent) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(e, _)| *e == event)
            .count()
    }
}

impl LifecycleLog for RecordingLog {
    fn record(&self, event: LifecycleEvent, outcome: Outcome<'_>) {
        let reason = match outcome {
            Outcome::Succeeded => None,
            Outcome::Failed(reason) => Some(reason.to_string()),
        };
        self.entries.lock().unwrap().push((event, reason));
    }
}

pub fn row(pairs: &[(&str, Value)]) -> QueryRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub fn fake_database() -> (Database, Arc<FakeDb>, Arc<RecordingLog>) {
    let fake = Arc::new(FakeDb::default());
    let log = Arc::new(RecordingLog::default());
    let db = Database::new(Arc::new(FakePool(fake.clone())), log.clone());
    (db, fake, log)
}
