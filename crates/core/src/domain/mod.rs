// Domain Layer - Rows, envelopes and transaction state

pub mod envelope;
pub mod row;
pub mod timestamp;
pub mod transaction;

// Re-exports
pub use envelope::ResponseEnvelope;
pub use row::{QueryResult, QueryRow};
pub use transaction::{ControlOp, TxState};
