use std::path::Path;

use anyhow::Result;
use clap::Args;
use helpdesk_core::source::SourceKind;

#[derive(Args, Debug, Default)]
pub struct TuiArgs {
    /// Ticket source: seed or store (defaults to the project config).
    #[arg(long)]
    pub source: Option<SourceKind>,
}

/// Execute `hd tui`.
///
/// # Errors
///
/// Returns an error if tickets cannot be loaded or the terminal fails.
pub fn run_tui(args: &TuiArgs, project_root: &Path) -> Result<()> {
    let view = super::open_view(args.source, project_root)?;
    tracing::info!(tickets = view.tickets().len(), "starting tui");
    crate::tui::run(view)
}
