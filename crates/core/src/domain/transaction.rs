// Transaction state machine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction state of one session
///
/// `Committed` and `RolledBack` are terminal for the current transaction and
/// behave like `Idle` for the next `BEGIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxState {
    Idle,
    InTransaction,
    Committed,
    RolledBack,
}

impl TxState {
    pub fn is_open(&self) -> bool {
        matches!(self, TxState::InTransaction)
    }
}

impl fmt::Display for TxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TxState::Idle => "IDLE",
            TxState::InTransaction => "IN_TRANSACTION",
            TxState::Committed => "COMMITTED",
            TxState::RolledBack => "ROLLED_BACK",
        };
        write!(f, "{}", s)
    }
}

/// Transaction control commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlOp {
    Begin,
    Commit,
    Rollback,
}

impl ControlOp {
    /// SQL text sent to the server
    pub fn sql(&self) -> &'static str {
        match self {
            ControlOp::Begin => "BEGIN",
            ControlOp::Commit => "COMMIT",
            ControlOp::Rollback => "ROLLBACK",
        }
    }
}

impl fmt::Display for ControlOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}
