// pgstarter Core - Domain, Ports & Transactional Services
// NO database driver here; adapters live in pgstarter-infra-postgres

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{DbError, ErrorKind, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
