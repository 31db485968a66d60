// Port Layer - Interfaces for external dependencies

pub mod connection;
pub mod lifecycle_log;
pub mod time_provider;

// Re-exports
pub use connection::{Connection, ConnectionPool, DriverError};
pub use lifecycle_log::{LifecycleEvent, LifecycleLog, Outcome, TracingLifecycleLog};
pub use time_provider::TimeProvider;
