// Sample API Use Case
//
// begin -> query -> commit, folded into a `ResponseEnvelope`.

use super::database::Database;
use crate::domain::{QueryResult, ResponseEnvelope};
use crate::error::Result;
use tracing::debug;

/// Statement served by the template's sample endpoint
pub const SAMPLE_QUERY: &str = "SELECT * FROM mst_tweet";

/// Run `sql` in its own transaction and wrap the outcome
pub async fn execute(db: &Database, sql: &str) -> ResponseEnvelope {
    match run(db, sql).await {
        Ok(rows) => ResponseEnvelope::success(rows),
        Err(err) => ResponseEnvelope::failure(err.reason()),
    }
}

async fn run(db: &Database, sql: &str) -> Result<QueryResult> {
    let mut session = db.session().await?;
    session.start_transaction().await?;

    let result = match session.query(sql).await {
        Ok(rows) => session.commit().await.map(|_| rows),
        Err(err) => Err(err),
    };

    // A failed query has normally rolled back already; only a transaction
    // still open at this point (e.g. after a failed COMMIT) is closed here.
    if result.is_err() && session.state().is_open() {
        // Failure already logged by the session; the original error wins.
        if let Err(e) = session.rollback().await {
            debug!(error = %e, "Cleanup rollback failed");
        }
    }

    result
}
