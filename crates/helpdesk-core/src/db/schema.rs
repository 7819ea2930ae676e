//! On-disk layout of the ticket store.
//!
//! `seq` backs the public `TK-###` id and `created_at` is stamped by SQLite
//! at insert time. `PRAGMA user_version` records the layout; a fresh file is
//! stamped on first open and anything else is refused.

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::error::HelpdeskError;

/// Layout written by this build.
pub const SCHEMA_VERSION: i64 = 1;

const CREATE_TICKETS: &str = r"
CREATE TABLE tickets (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL CHECK (length(trim(title)) > 0),
    description TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'open' CHECK (status IN ('open', 'in-progress', 'closed')),
    priority TEXT NOT NULL DEFAULT 'medium' CHECK (priority IN ('high', 'medium', 'low')),
    author TEXT NOT NULL DEFAULT '',
    assignee TEXT NOT NULL DEFAULT '',
    category TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
);
";

/// Layout version recorded in the file, `0` for a file nobody has stamped.
///
/// # Errors
///
/// Returns an error if the pragma cannot be read.
pub fn stored_version(conn: &Connection) -> Result<i64> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .context("read store layout version")
}

/// Create the `tickets` table in an unstamped file, or check that a stamped
/// file holds the layout this build reads.
///
/// # Errors
///
/// Returns [`HelpdeskError::CorruptStore`] for a different layout version or
/// an unstamped file that already has its own `tickets` table.
pub fn ensure(conn: &Connection) -> Result<()> {
    match stored_version(conn)? {
        SCHEMA_VERSION => Ok(()),
        0 => {
            conn.execute_batch(&format!(
                "BEGIN;\n{CREATE_TICKETS}\nPRAGMA user_version = {SCHEMA_VERSION};\nCOMMIT;"
            ))
            .map_err(|err| {
                let _ = conn.execute_batch("ROLLBACK;");
                HelpdeskError::CorruptStore {
                    reason: format!("cannot create tickets table: {err}"),
                }
            })?;
            tracing::info!(version = SCHEMA_VERSION, "ticket store created");
            Ok(())
        }
        other => Err(HelpdeskError::CorruptStore {
            reason: format!("layout version {other}, this build reads {SCHEMA_VERSION}"),
        }
        .into()),
    }
}
