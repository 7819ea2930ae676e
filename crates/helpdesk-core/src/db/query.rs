//! Typed reads and the create action for the ticket store.
//!
//! All functions take a shared `&Connection` and return typed structs,
//! never raw rows.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;

use crate::error::HelpdeskError;
use crate::model::{Priority, Status, Ticket};

const TICKET_ID_PREFIX: &str = "TK-";

const TICKET_COLUMNS: &str =
    "seq, title, description, status, priority, author, assignee, category, created_at";

// ---------------------------------------------------------------------------
// Input / result types
// ---------------------------------------------------------------------------

/// Fields a caller supplies when opening a ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub author: String,
    pub assignee: String,
    pub category: String,
}

impl NewTicket {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Title and description are both required.
    ///
    /// # Errors
    ///
    /// Returns [`HelpdeskError::EmptyField`] naming the first blank field.
    pub fn validate(&self) -> Result<(), HelpdeskError> {
        if self.title.trim().is_empty() {
            return Err(HelpdeskError::EmptyField { field: "title" });
        }
        if self.description.trim().is_empty() {
            return Err(HelpdeskError::EmptyField {
                field: "description",
            });
        }
        Ok(())
    }
}

/// A ticket row together with its store-assigned timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredTicket {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub created_at: DateTime<Utc>,
}

/// Raw column values before enum/date parsing.
struct TicketRow {
    seq: i64,
    title: String,
    description: String,
    status: String,
    priority: String,
    author: String,
    assignee: String,
    category: String,
    created_at: String,
}

impl TicketRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            seq: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            status: row.get(3)?,
            priority: row.get(4)?,
            author: row.get(5)?,
            assignee: row.get(6)?,
            category: row.get(7)?,
            created_at: row.get(8)?,
        })
    }

    fn into_stored(self) -> Result<StoredTicket, HelpdeskError> {
        let corrupt = |reason: String| HelpdeskError::CorruptStore { reason };
        let status = self
            .status
            .parse::<Status>()
            .map_err(|e| corrupt(format!("seq {}: {e}", self.seq)))?;
        let priority = self
            .priority
            .parse::<Priority>()
            .map_err(|e| corrupt(format!("seq {}: {e}", self.seq)))?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| corrupt(format!("seq {}: bad created_at '{}': {e}", self.seq, self.created_at)))?
            .with_timezone(&Utc);

        Ok(StoredTicket {
            ticket: Ticket {
                id: ticket_id_from_seq(self.seq),
                title: self.title,
                description: self.description,
                status,
                priority,
                author: self.author,
                assignee: self.assignee,
                date: created_at.date_naive(),
                category: self.category,
            },
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

/// Public id for a store sequence number, e.g. `7 -> "TK-007"`.
#[must_use]
pub fn ticket_id_from_seq(seq: i64) -> String {
    format!("{TICKET_ID_PREFIX}{seq:03}")
}

/// Inverse of [`ticket_id_from_seq`]; the prefix is matched case-insensitively.
///
/// Only the canonical spelling is accepted: `TK-005`, not `TK-5`, `TK-0005`
/// or `TK-+5`.
#[must_use]
pub fn seq_from_ticket_id(id: &str) -> Option<i64> {
    let id = id.trim();
    let digits = id.get(TICKET_ID_PREFIX.len()..)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let seq = digits.parse::<i64>().ok().filter(|seq| *seq > 0)?;
    ticket_id_from_seq(seq).eq_ignore_ascii_case(id).then_some(seq)
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Insert a new ticket with `status = open` and return the stored row.
///
/// This is a single `INSERT ... RETURNING`; the id and `created_at` are
/// generated by the store.
///
/// # Errors
///
/// Returns [`HelpdeskError::EmptyField`] for a blank title or description,
/// or an error if the insert fails.
pub fn create_ticket(conn: &Connection, new: &NewTicket) -> Result<StoredTicket> {
    new.validate()?;

    let sql = format!(
        "INSERT INTO tickets (title, description, status, priority, author, assignee, category)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         RETURNING {TICKET_COLUMNS}"
    );
    let row = conn
        .query_row(
            &sql,
            params![
                new.title.trim(),
                new.description.trim(),
                Status::Open.as_str(),
                new.priority.as_str(),
                new.author,
                new.assignee,
                new.category,
            ],
            TicketRow::from_row,
        )
        .context("insert ticket")?;

    let stored = row.into_stored()?;
    tracing::info!(id = %stored.ticket.id, "ticket created");
    Ok(stored)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Every stored ticket, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_tickets(conn: &Connection) -> Result<Vec<StoredTicket>> {
    let sql = format!("SELECT {TICKET_COLUMNS} FROM tickets ORDER BY seq ASC");
    let mut stmt = conn.prepare(&sql).context("prepare list_tickets")?;
    let rows = stmt
        .query_map([], TicketRow::from_row)
        .context("execute list_tickets")?;

    let mut tickets = Vec::new();
    for row in rows {
        let row = row.context("read ticket row")?;
        tickets.push(row.into_stored()?);
    }
    Ok(tickets)
}

/// Look up one ticket by its public id.
///
/// # Errors
///
/// Returns [`HelpdeskError::TicketNotFound`] if the id is malformed or unknown.
pub fn get_ticket(conn: &Connection, id: &str) -> Result<StoredTicket> {
    let not_found = || HelpdeskError::TicketNotFound { id: id.to_string() };
    let seq = seq_from_ticket_id(id).ok_or_else(not_found)?;

    let sql = format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE seq = ?1");
    let row = conn
        .query_row(&sql, [seq], TicketRow::from_row)
        .optional()
        .context("query ticket by id")?
        .ok_or_else(not_found)?;
    Ok(row.into_stored()?)
}
