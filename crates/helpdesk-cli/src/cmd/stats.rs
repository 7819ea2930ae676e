//! `hd stats`: the four status tiles.

use std::io::Write;
use std::path::Path;

use clap::Args;
use helpdesk_core::source::SourceKind;
use helpdesk_core::view::StatTile;

use crate::output::{OutputMode, render};

/// Arguments for `hd stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {
    /// Ticket source: seed or store (defaults to the project config).
    #[arg(long)]
    pub source: Option<SourceKind>,
}

/// Execute `hd stats`. Counts always cover the full ticket set.
///
/// # Errors
///
/// Returns an error if the ticket source cannot be loaded.
pub fn run_stats(args: &StatsArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let view = super::open_view(args.source, project_root)?;
    let tiles = view.stat_tiles();
    match output {
        OutputMode::Text => render(output, &tiles, |tiles, w| render_stats_text(tiles, w)),
        _ => render(output, &tiles, |tiles, w| render_stats_human(tiles, w)),
    }
}

fn render_stats_text(tiles: &[StatTile; 4], w: &mut dyn Write) -> std::io::Result<()> {
    for tile in tiles {
        writeln!(w, "{}\t{}", tile.filter, tile.count)?;
    }
    Ok(())
}

fn render_stats_human(tiles: &[StatTile; 4], w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "Tickets")?;
    for tile in tiles {
        writeln!(w, "  {:<12} {:>4}", tile.filter.label(), tile.count)?;
    }
    Ok(())
}
