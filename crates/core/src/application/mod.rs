// Application Layer - Connection management and transactional sessions

pub mod database;
pub mod sample_api;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use database::{Database, QueryFailureRollback, RollbackPolicy};
pub use session::Session;
pub use state::AppState;
