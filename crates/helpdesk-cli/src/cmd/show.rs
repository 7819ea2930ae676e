//! `hd show`: one ticket in full.

use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use clap::Args;
use helpdesk_core::db::{self, query};
use helpdesk_core::error::HelpdeskError;
use helpdesk_core::model::Ticket;
use helpdesk_core::source::SourceKind;
use serde::Serialize;

use crate::output::{OutputMode, Renderable, pretty_kv, pretty_section, render_item};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Ticket ID, e.g. TK-003.
    pub id: String,

    /// Ticket source: seed or store (defaults to the project config).
    #[arg(long)]
    pub source: Option<SourceKind>,
}

/// Full ticket view shared by `hd show` and `hd create`.
#[derive(Debug, Serialize)]
pub struct TicketDetail<'a> {
    #[serde(flatten)]
    pub ticket: &'a Ticket,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl<'a> TicketDetail<'a> {
    pub const fn new(ticket: &'a Ticket) -> Self {
        Self {
            ticket,
            created_at: None,
        }
    }
}

impl Renderable for TicketDetail<'_> {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let t = self.ticket;
        pretty_section(w, &format!("{}  {}", t.id, t.title))?;
        pretty_kv(w, "Status", t.status.label())?;
        pretty_kv(w, "Priority", t.priority.label())?;
        pretty_kv(w, "Category", &t.category)?;
        pretty_kv(w, "Author", &t.author)?;
        pretty_kv(w, "Assignee", &t.assignee)?;
        match self.created_at {
            Some(at) => pretty_kv(w, "Created", at.format("%Y-%m-%d %H:%M UTC").to_string())?,
            None => pretty_kv(w, "Date", t.date.to_string())?,
        }
        writeln!(w)?;
        writeln!(w, "{}", t.description)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(w, self).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        let t = self.ticket;
        for (key, value) in [
            ("id", t.id.as_str()),
            ("title", t.title.as_str()),
            ("status", t.status.as_str()),
            ("priority", t.priority.as_str()),
            ("category", t.category.as_str()),
            ("author", t.author.as_str()),
            ("assignee", t.assignee.as_str()),
        ] {
            writeln!(w, "{key}\t{value}")?;
        }
        writeln!(w, "date\t{}", t.date)?;
        writeln!(w, "description\t{}", t.description.replace('\n', " "))
    }
}

/// Execute `hd show`.
///
/// # Errors
///
/// Returns [`HelpdeskError::TicketNotFound`] if no ticket has that id.
pub fn run_show(args: &ShowArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let (config, store_path) = super::store_location(project_root)?;
    let kind = args.source.unwrap_or(config.tickets.source);

    if kind == SourceKind::Store {
        let conn = db::open_existing_store(&store_path)?;
        let stored = query::get_ticket(&conn, &args.id)?;
        let detail = TicketDetail {
            ticket: &stored.ticket,
            created_at: Some(stored.created_at),
        };
        render_item(&detail, output)?;
        return Ok(());
    }

    let view = super::open_view(Some(kind), project_root)?;
    let ticket = view
        .tickets()
        .iter()
        .find(|t| t.id.eq_ignore_ascii_case(args.id.trim()))
        .ok_or_else(|| HelpdeskError::TicketNotFound {
            id: args.id.clone(),
        })?;
    render_item(&TicketDetail::new(ticket), output)?;
    Ok(())
}
