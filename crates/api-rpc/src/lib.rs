//! JSON-RPC API Layer
//!
//! Serves the template's sample endpoint: one transaction around one query,
//! answered with a `ResponseEnvelope`.

pub mod error;
pub mod handler;
pub mod rate_limiter;
pub mod server;
pub mod types;

pub use server::{RpcServer, RpcServerConfig};
