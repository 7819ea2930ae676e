pub mod chat;
pub mod completions;
pub mod create;
pub mod init;
pub mod list;
pub mod show;
pub mod stats;
pub mod tui;

use std::path::Path;

use anyhow::Result;
use helpdesk_core::config::{ProjectConfig, load_project_config};
use helpdesk_core::source::SourceKind;
use helpdesk_core::view::TicketView;

/// Load the ticket source (flag, else project config) and open a fresh view.
pub fn open_view(source_flag: Option<SourceKind>, project_root: &Path) -> Result<TicketView> {
    let config = load_project_config(project_root)?;
    let kind = source_flag.unwrap_or(config.tickets.source);
    let tickets = kind.open(&config.store_path(project_root)).load()?;
    tracing::debug!(source = %kind, count = tickets.len(), "tickets loaded");
    Ok(TicketView::new(tickets)?)
}

/// Project config plus the resolved store path.
pub fn store_location(project_root: &Path) -> Result<(ProjectConfig, std::path::PathBuf)> {
    let config = load_project_config(project_root)?;
    let path = config.store_path(project_root);
    Ok((config, path))
}
