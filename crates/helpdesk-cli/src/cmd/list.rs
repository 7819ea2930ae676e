//! `hd list`: filtered, sorted ticket list.

use std::io::{self, Write};
use std::path::Path;

use clap::Args;
use helpdesk_core::model::Ticket;
use helpdesk_core::source::SourceKind;
use helpdesk_core::view::{SortField, StatusFilter, TicketView, ViewEvent, ViewState};

use crate::output::{OutputMode, Renderable, pretty_rule, write_list};

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive text matched against title, description, and id.
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Filter by status: all, open, in-progress, closed.
    #[arg(short, long)]
    pub status: Option<StatusFilter>,

    /// Sort by status, priority, or date. Repeat to flip the direction.
    #[arg(long = "sort", value_name = "FIELD")]
    pub sort: Vec<SortField>,

    /// Ticket source: seed or store (defaults to the project config).
    #[arg(long)]
    pub source: Option<SourceKind>,

    /// Maximum tickets to show.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    /// The flags as the interactions a user would have made in the list view.
    pub fn events(&self) -> Vec<ViewEvent> {
        let mut events = Vec::new();
        if let Some(search) = &self.search {
            events.push(ViewEvent::SearchChanged(search.clone()));
        }
        if let Some(status) = self.status {
            events.push(ViewEvent::StatusFilterSelected(status));
        }
        events.extend(self.sort.iter().copied().map(ViewEvent::SortColumnClicked));
        events
    }
}

/// One ticket as a list row.
pub struct TicketRow<'a>(pub &'a Ticket);

impl Renderable for TicketRow<'_> {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let t = self.0;
        writeln!(
            w,
            "{:<8} {:<13} {:<10} {:<10}  {}",
            t.id,
            t.status.label(),
            t.priority.label(),
            t.date,
            t.title
        )
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(w, self.0).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        let t = self.0;
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            t.id, t.status, t.priority, t.date, t.category, t.assignee, t.title
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["ID", "STATUS", "PRIORITY", "DATE", "CATEGORY", "ASSIGNEE", "TITLE"]
    }
}

/// Header line for pretty output; sortable columns carry their arrow.
pub fn pretty_header(state: &ViewState) -> String {
    let col = |label: &str, field: SortField| {
        format!("{label} {}", state.sort_indicator(field).arrow())
    };
    format!(
        "{:<8} {:<13} {:<10} {:<10}  {}",
        "ID",
        col("STATUS", SortField::Status),
        col("PRIORITY", SortField::Priority),
        col("DATE", SortField::Date),
        "TITLE"
    )
}

/// Execute `hd list`.
///
/// # Errors
///
/// Returns an error if the ticket source cannot be loaded or stdout fails.
pub fn run_list(args: &ListArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let mut view = super::open_view(args.source, project_root)?;
    for event in args.events() {
        view.dispatch(event);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_listing(&mut out, &view, args.limit, output)?;
    Ok(())
}

/// The empty state is decided by what the pipeline matched, not by what
/// `limit` leaves on screen.
fn write_listing(
    out: &mut dyn Write,
    view: &TicketView,
    limit: Option<usize>,
    output: OutputMode,
) -> io::Result<()> {
    let visible = view.visible();
    let shown = limit.map_or(visible.len(), |n| n.min(visible.len()));
    tracing::debug!(
        visible = visible.len(),
        shown,
        total = view.tickets().len(),
        "list rendered"
    );
    let rows: Vec<TicketRow<'_>> = visible[..shown].iter().copied().map(TicketRow).collect();

    if visible.is_empty() {
        write_list(out, &rows, output)?;
        if output == OutputMode::Pretty && !view.state().is_unfiltered() {
            writeln!(
                out,
                "Press Esc in `hd tui` or drop --search/--status to see every ticket."
            )?;
        }
        return Ok(());
    }

    match output {
        OutputMode::Pretty => {
            writeln!(out, "{}", pretty_header(view.state()))?;
            pretty_rule(out)?;
            for row in &rows {
                row.render_human(out)?;
            }
            if shown < visible.len() {
                writeln!(out, "… {} more (use -n to show more)", visible.len() - shown)?;
            }
        }
        OutputMode::Text => {
            writeln!(out, "{}", TicketRow::table_headers().join("\t"))?;
            for row in &rows {
                row.render_table(out)?;
            }
        }
        OutputMode::Json => write_list(out, &rows, output)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output;
    use clap::Parser;
    use helpdesk_core::view::{SortDirection, reduce};

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ListArgs,
    }

    #[test]
    fn list_args_defaults() {
        let w = Wrapper::parse_from(["test"]);
        assert!(w.args.search.is_none());
        assert!(w.args.status.is_none());
        assert!(w.args.sort.is_empty());
        assert!(w.args.limit.is_none());
        assert!(w.args.events().is_empty());
    }

    #[test]
    fn repeated_sort_flag_flips_direction() {
        let w = Wrapper::parse_from(["test", "--sort", "priority", "--sort", "priority"]);
        let state = w
            .args
            .events()
            .into_iter()
            .fold(ViewState::default(), reduce);
        assert_eq!(state.sort_field, Some(SortField::Priority));
        assert_eq!(state.sort_direction, SortDirection::Descending);
    }

    #[test]
    fn flags_replay_in_order() {
        let w = Wrapper::parse_from([
            "test",
            "-q",
            "Login",
            "--status",
            "in-progress",
            "--sort",
            "date",
        ]);
        assert_eq!(
            w.args.events(),
            vec![
                ViewEvent::SearchChanged("Login".into()),
                ViewEvent::StatusFilterSelected(StatusFilter::InProgress),
                ViewEvent::SortColumnClicked(SortField::Date),
            ]
        );
    }

    #[test]
    fn bad_status_is_rejected_by_parser() {
        assert!(Wrapper::try_parse_from(["test", "--status", "pending"]).is_err());
        assert!(Wrapper::try_parse_from(["test", "--sort", "title"]).is_err());
    }

    #[test]
    fn header_shows_active_sort_arrow() {
        let state = reduce(
            ViewState::default(),
            ViewEvent::SortColumnClicked(SortField::Date),
        );
        let header = pretty_header(&state);
        assert!(header.contains("DATE ↑"));
        assert!(header.contains("STATUS ↕"));
    }

    fn listing(events: &[ViewEvent], limit: Option<usize>, output: OutputMode) -> String {
        let mut view = TicketView::new(helpdesk_core::seed::sample_tickets()).unwrap();
        for event in events {
            view.dispatch(event.clone());
        }
        let mut buf = Vec::new();
        write_listing(&mut buf, &view, limit, output).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn zero_limit_is_not_the_empty_state() {
        let text = listing(&[], Some(0), OutputMode::Text);
        assert_eq!(text, "ID\tSTATUS\tPRIORITY\tDATE\tCATEGORY\tASSIGNEE\tTITLE\n");

        let pretty = listing(&[], Some(0), OutputMode::Pretty);
        assert!(!pretty.contains(output::EMPTY_STATE));
        assert!(pretty.contains("… 6 more"));

        assert_eq!(listing(&[], Some(0), OutputMode::Json), "[]\n");
    }

    #[test]
    fn limit_truncates_and_reports_the_rest() {
        let pretty = listing(&[], Some(2), OutputMode::Pretty);
        assert!(pretty.contains("TK-002"));
        assert!(!pretty.contains("TK-003"));
        assert!(pretty.contains("… 4 more"));
    }

    #[test]
    fn no_match_shows_empty_state_and_hint() {
        let events = [ViewEvent::SearchChanged("zzzz".into())];
        let pretty = listing(&events, None, OutputMode::Pretty);
        assert!(pretty.starts_with(output::EMPTY_STATE));
        assert!(pretty.contains("drop --search"));
        assert_eq!(listing(&events, Some(3), OutputMode::Text), "No tickets found\n");
    }

    #[test]
    fn text_row_is_tab_separated() {
        let ticket = helpdesk_core::seed::sample_tickets().remove(0);
        let mut buf = Vec::new();
        TicketRow(&ticket).render_table(&mut buf).unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert_eq!(line.trim_end().split('\t').count(), 7);
        assert!(line.starts_with("TK-001\t"));
    }
}
