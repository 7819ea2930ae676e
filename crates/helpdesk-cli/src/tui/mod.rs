//! Terminal user interface for browsing tickets.
//!
//! ## Entry points
//!
//! - [`run`]: full-screen ticket list with stat tiles, search, and sorting.

pub mod list;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use crossterm::execute;
use helpdesk_core::view::TicketView;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use list::ListView;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Run the ticket list until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn, or restored.
pub fn run(view: TicketView) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let result = event_loop(ListView::new(view), CrosstermBackend::new(stdout));

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn event_loop(mut app: ListView, backend: CrosstermBackend<io::Stdout>) -> Result<()> {
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    while !app.should_quit() {
        terminal
            .draw(|frame| app.render(frame, frame.area()))
            .context("draw frame")?;

        if !event::poll(POLL_INTERVAL).context("poll event")? {
            continue;
        }
        // Release events arrive on some platforms; only presses count.
        if let Event::Key(key) = event::read().context("read event")?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }
    Ok(())
}
