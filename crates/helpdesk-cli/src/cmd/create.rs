//! `hd create`: open a new ticket in the store.

use std::path::Path;

use clap::Args;
use helpdesk_core::db::{self, query::NewTicket, query::create_ticket};
use helpdesk_core::model::Priority;

use super::show::TicketDetail;
use crate::author;
use crate::output::{OutputMode, render_item};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Short summary of the problem.
    #[arg(short, long)]
    pub title: String,

    /// What happened and what you expected.
    #[arg(short, long)]
    pub description: String,

    /// high, medium, or low.
    #[arg(short, long, default_value = "medium")]
    pub priority: Priority,

    /// Free-form category, e.g. Bug or Feature Request.
    #[arg(short, long, default_value = "")]
    pub category: String,

    /// Team or person the ticket is routed to.
    #[arg(long, default_value = "")]
    pub assignee: String,

    /// Override the author identity (skips env resolution).
    #[arg(long)]
    pub author: Option<String>,
}

impl CreateArgs {
    fn to_new_ticket(&self) -> NewTicket {
        NewTicket {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            author: author::resolve_author(self.author.as_deref()),
            assignee: self.assignee.trim().to_string(),
            category: self.category.trim().to_string(),
        }
    }
}

/// Execute `hd create`.
///
/// # Errors
///
/// Returns an error if the store is not initialized, a required field is
/// blank, or the insert fails.
pub fn run_create(args: &CreateArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let (_, store_path) = super::store_location(project_root)?;
    let new = args.to_new_ticket();
    new.validate()?;

    let conn = db::open_existing_store(&store_path)?;
    let stored = create_ticket(&conn, &new)?;

    let detail = TicketDetail {
        ticket: &stored.ticket,
        created_at: Some(stored.created_at),
    };
    render_item(&detail, output)?;
    Ok(())
}
