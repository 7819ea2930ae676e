//! SQLite ticket store.
//!
//! Connections run in WAL mode so the list view can read while `hd create`
//! writes, with a short busy timeout for the writer.

pub mod query;
pub mod schema;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::{path::Path, time::Duration};

use crate::error::HelpdeskError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (or create) the ticket store and check its layout.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or configured, or
/// [`HelpdeskError::CorruptStore`] if it holds a layout this build cannot read.
pub fn open_store(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create store directory {}", parent.display()))?;
    }

    let conn = Connection::open(path)
        .with_context(|| format!("open ticket store {}", path.display()))?;
    conn.busy_timeout(BUSY_TIMEOUT)
        .context("set store busy timeout")?;
    let journal_mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .context("enable WAL journal")?;

    schema::ensure(&conn)?;
    tracing::debug!(path = %path.display(), %journal_mode, "ticket store ready");

    Ok(conn)
}

/// Open the store only if it already exists on disk.
///
/// # Errors
///
/// Returns [`HelpdeskError::NotInitialized`] when the file is missing, or an
/// error from [`open_store`].
pub fn open_existing_store(path: &Path) -> Result<Connection> {
    if !path.exists() {
        return Err(HelpdeskError::NotInitialized {
            path: path.display().to_string(),
        }
        .into());
    }
    open_store(path)
}
