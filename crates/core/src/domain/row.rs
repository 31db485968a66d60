// Query result rows

use serde_json::{Map, Value};

/// One result row: column name -> value, in statement column order
pub type QueryRow = Map<String, Value>;

/// Rows returned by a single statement
pub type QueryResult = Vec<QueryRow>;
