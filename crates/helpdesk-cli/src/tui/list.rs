//! TUI ticket list.
//!
//! Layout, top to bottom: four stat tiles, the ticket table (or the empty
//! state), and a one-line status bar. Enter opens a detail pane on the right.
//!
//! Key bindings: `1`-`4` pick a tile, `/` search, `s`/`p`/`d` sort by
//! status/priority/date (again to flip), j/k navigate, Esc reset, q quit.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use helpdesk_core::model::{Priority, Status, Ticket};
use helpdesk_core::view::{SortField, StatTile, StatusFilter, TicketView, ViewEvent, ViewState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

use crate::output::EMPTY_STATE;

/// How long a transient status message stays in the status bar.
const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InputMode {
    #[default]
    Normal,
    /// User is typing a search query.
    Search,
}

pub struct ListView {
    view: TicketView,
    /// Selected row, indexing into the current visible rows.
    table_state: TableState,
    input_mode: InputMode,
    /// Buffer for the search query being typed.
    search_buf: String,
    /// Query value before entering Search mode (for Esc cancel).
    search_prev: String,
    show_detail: bool,
    should_quit: bool,
    status_msg: Option<(String, Instant)>,
}

impl ListView {
    pub fn new(view: TicketView) -> Self {
        let mut list = Self {
            view,
            table_state: TableState::default(),
            input_mode: InputMode::default(),
            search_buf: String::new(),
            search_prev: String::new(),
            show_detail: false,
            should_quit: false,
            status_msg: None,
        };
        list.clamp_selection();
        list
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn selected_ticket(&self) -> Option<&Ticket> {
        let idx = self.table_state.selected()?;
        self.view.visible().get(idx).copied()
    }

    fn set_status(&mut self, msg: String) {
        self.status_msg = Some((msg, Instant::now()));
    }

    /// Send one event through the reducer and keep the selection in range.
    fn dispatch(&mut self, event: ViewEvent) {
        self.view.dispatch(event);
        self.clamp_selection();
    }

    fn visible_len(&self) -> usize {
        self.view.visible().len()
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        let selected = match self.table_state.selected() {
            _ if len == 0 => None,
            Some(idx) => Some(idx.min(len - 1)),
            None => Some(0),
        };
        self.table_state.select(selected);
        if selected.is_none() {
            self.show_detail = false;
        }
    }

    fn select_by(&mut self, delta: isize) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.table_state.select(Some(next));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Search => self.handle_search_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.select_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.select_by(-1),
            KeyCode::PageDown => self.select_by(10),
            KeyCode::PageUp => self.select_by(-10),
            KeyCode::Char('g') | KeyCode::Home => self.select_by(isize::MIN),
            KeyCode::Char('G') | KeyCode::End => self.select_by(isize::MAX),

            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                self.show_detail = self.selected_ticket().is_some();
            }
            KeyCode::Char('h') | KeyCode::Left if self.show_detail => {
                self.show_detail = false;
            }

            KeyCode::Char(c @ '1'..='4') => {
                let idx = (c as usize) - ('1' as usize);
                let filter = StatusFilter::ALL[idx];
                self.dispatch(ViewEvent::StatusFilterSelected(filter));
                self.set_status(format!("Showing: {}", filter.label()));
            }

            KeyCode::Char('/') => {
                self.search_prev = self.view.state().search_term.clone();
                self.search_buf = self.search_prev.clone();
                self.input_mode = InputMode::Search;
            }

            KeyCode::Char(c @ ('s' | 'p' | 'd')) => {
                let field = match c {
                    's' => SortField::Status,
                    'p' => SortField::Priority,
                    _ => SortField::Date,
                };
                self.dispatch(ViewEvent::SortColumnClicked(field));
                let msg = format!("Sort: {field} {}", self.view.state().sort_direction);
                self.set_status(msg);
            }

            KeyCode::Esc => {
                if self.show_detail {
                    self.show_detail = false;
                } else if *self.view.state() != ViewState::default() {
                    self.dispatch(ViewEvent::Reset);
                    self.search_buf.clear();
                    self.set_status("Filters cleared".to_string());
                }
            }

            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search_buf = self.search_prev.clone();
                self.dispatch(ViewEvent::SearchChanged(self.search_prev.clone()));
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.search_buf.pop();
                self.dispatch(ViewEvent::SearchChanged(self.search_buf.clone()));
            }
            KeyCode::Char(c) => {
                self.search_buf.push(c);
                self.dispatch(ViewEvent::SearchChanged(self.search_buf.clone()));
            }
            _ => {}
        }
    }

    /// Render the list view into `area` within the given frame.
    pub fn render(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        render_into(frame, self, area);
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

const fn status_color(status: Status) -> Color {
    match status {
        Status::Open => Color::Green,
        Status::InProgress => Color::Yellow,
        Status::Closed => Color::DarkGray,
    }
}

const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Blue,
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let truncated: String = s.chars().take(max_chars - 1).collect();
    format!("{truncated}…")
}

fn build_row(ticket: &Ticket, title_width: u16) -> Row<'static> {
    Row::new([
        Cell::from(Span::styled(
            ticket.id.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Cell::from(Span::styled(
            ticket.status.label(),
            Style::default().fg(status_color(ticket.status)),
        )),
        Cell::from(Span::styled(
            ticket.priority.label(),
            Style::default().fg(priority_color(ticket.priority)),
        )),
        Cell::from(ticket.date.to_string()),
        Cell::from(truncate(&ticket.title, title_width as usize)),
        Cell::from(Span::styled(
            ticket.assignee.clone(),
            Style::default().fg(Color::Cyan),
        )),
    ])
}

fn header_row(state: &ViewState) -> Row<'static> {
    let sortable = |label: &str, key: char, field: SortField| {
        let style = if state.sort_field == Some(field) {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Cell::from(Span::styled(
            format!("{label} {} [{key}]", state.sort_indicator(field).arrow()),
            style,
        ))
    };
    let plain = |label: &'static str| {
        Cell::from(Span::styled(label, Style::default().add_modifier(Modifier::BOLD)))
    };
    Row::new([
        plain("ID"),
        sortable("Status", 's', SortField::Status),
        sortable("Priority", 'p', SortField::Priority),
        sortable("Date", 'd', SortField::Date),
        plain("Title"),
        plain("Assignee"),
    ])
}

fn render_tiles(frame: &mut ratatui::Frame<'_>, tiles: &[StatTile; 4], state: &ViewState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (i, (tile, chunk)) in tiles.iter().zip(chunks.iter()).enumerate() {
        let active = tile.is_active(state);
        let border_style = if active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(border_style)
            .title(format!(" {} {} ", i + 1, tile.filter.label()));
        let count_style = if active {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(tile.count.to_string(), count_style))
                .alignment(Alignment::Center)
                .block(block),
            *chunk,
        );
    }
}

fn detail_lines(ticket: &Ticket) -> Vec<Line<'static>> {
    let key_style = Style::default().fg(Color::DarkGray);
    let field = |key: &'static str, value: String, style: Style| {
        Line::from(vec![
            Span::styled(format!("{key:<10}"), key_style),
            Span::styled(value, style),
        ])
    };
    let mut lines = vec![
        Line::from(Span::styled(
            ticket.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        field(
            "Status",
            ticket.status.label().to_string(),
            Style::default().fg(status_color(ticket.status)),
        ),
        field(
            "Priority",
            ticket.priority.label().to_string(),
            Style::default().fg(priority_color(ticket.priority)),
        ),
        field("Category", ticket.category.clone(), Style::default()),
        field("Author", ticket.author.clone(), Style::default()),
        field("Assignee", ticket.assignee.clone(), Style::default()),
        field("Date", ticket.date.to_string(), Style::default()),
        Line::default(),
    ];
    lines.extend(ticket.description.lines().map(|l| Line::from(l.to_string())));
    lines
}

fn render_detail_panel(frame: &mut ratatui::Frame<'_>, ticket: &Ticket, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Green))
        .title(format!(" {} ", ticket.id))
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    frame.render_widget(
        Paragraph::new(detail_lines(ticket))
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

fn render_into(frame: &mut ratatui::Frame<'_>, app: &mut ListView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    let (tiles_area, content_area, status_area) = (chunks[0], chunks[1], chunks[2]);

    render_tiles(frame, &app.view.stat_tiles(), app.view.state(), tiles_area);

    let selected = app.selected_ticket().cloned();
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if app.show_detail && selected.is_some() {
            [Constraint::Percentage(55), Constraint::Percentage(45)]
        } else {
            [Constraint::Percentage(100), Constraint::Percentage(0)]
        })
        .split(content_area);
    let (table_area, detail_area) = (content_chunks[0], content_chunks[1]);

    let visible = app.view.visible();
    let title = match app.input_mode {
        InputMode::Search => format!(" tickets · search: {}▏", app.search_buf),
        InputMode::Normal => format!(
            " tickets · {} of {} ",
            visible.len(),
            app.view.tickets().len()
        ),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Green))
        .title(title)
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new(vec![
                Line::default(),
                Line::from(Span::styled(
                    EMPTY_STATE,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Esc clears search and filters",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .block(block),
            table_area,
        );
    } else {
        let title_width = table_area.width.saturating_sub(60).max(12);
        let rows: Vec<Row<'static>> = visible
            .iter()
            .map(|ticket| build_row(ticket, title_width))
            .collect();
        let widths = [
            Constraint::Length(8),
            Constraint::Length(18),
            Constraint::Length(16),
            Constraint::Length(14),
            Constraint::Min(12),
            Constraint::Length(12),
        ];
        let table = Table::new(rows, widths)
            .header(header_row(app.view.state()))
            .block(block)
            .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol(" ");
        frame.render_stateful_widget(table, table_area, &mut app.table_state);
    }

    if let Some(ticket) = selected.filter(|_| app.show_detail)
        && detail_area.width > 0
    {
        render_detail_panel(frame, &ticket, detail_area);
    }

    frame.render_widget(
        Paragraph::new(build_status_bar(app, status_area.width)),
        status_area,
    );
}

fn build_status_bar(app: &ListView, width: u16) -> Line<'static> {
    if let Some((msg, at)) = &app.status_msg
        && at.elapsed() < STATUS_TTL
    {
        return Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Cyan)));
    }

    let key_style = Style::default().fg(Color::Cyan);
    let dim_style = Style::default().fg(Color::DarkGray);
    let hints: &[(&str, &str)] = match app.input_mode {
        InputMode::Search => &[("ESC", "cancel"), ("ENTER", "confirm")],
        InputMode::Normal if app.show_detail => &[("h/esc", "close"), ("j/k", "nav"), ("q", "quit")],
        InputMode::Normal => &[
            ("1-4", "tiles"),
            ("/", "search"),
            ("s/p/d", "sort"),
            ("enter", "open"),
            ("esc", "reset"),
            ("q", "quit"),
        ],
    };

    let mut spans: Vec<Span<'static>> = Vec::new();
    for (key, desc) in hints {
        spans.push(Span::styled((*key).to_string(), key_style));
        spans.push(Span::styled(format!(" {desc}  "), dim_style));
    }

    let version = format!("hd {}", env!("CARGO_PKG_VERSION"));
    let left_len: usize = spans.iter().map(|span| span.content.chars().count()).sum();
    let right_len = version.chars().count();
    if (width as usize) > left_len + right_len + 1 {
        spans.push(Span::raw(" ".repeat(width as usize - left_len - right_len)));
    } else {
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(version, dim_style));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpdesk_core::seed;
    use helpdesk_core::view::SortDirection;
    use ratatui::{Terminal, backend::TestBackend};

    fn make_view() -> ListView {
        ListView::new(TicketView::new(seed::sample_tickets()).unwrap())
    }

    fn press(app: &mut ListView, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut ListView, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn render_to_string(app: &mut ListView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        terminal.draw(|frame| app.render(frame, frame.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn opens_with_first_row_selected() {
        let app = make_view();
        assert_eq!(app.selected_ticket().map(|t| t.id.as_str()), Some("TK-001"));
        assert_eq!(*app.view.state(), ViewState::default());
    }

    #[test]
    fn number_keys_select_tiles() {
        let mut app = make_view();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.view.state().status_filter, StatusFilter::InProgress);
        assert_eq!(app.visible_len(), 2);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.view.state().status_filter, StatusFilter::All);
    }

    #[test]
    fn sort_keys_toggle_like_header_clicks() {
        let mut app = make_view();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.view.state().sort_field, Some(SortField::Priority));
        assert_eq!(app.view.state().sort_direction, SortDirection::Ascending);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.view.state().sort_direction, SortDirection::Descending);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.view.state().sort_field, Some(SortField::Date));
        assert_eq!(app.view.state().sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn search_mode_updates_live_and_esc_restores() {
        let mut app = make_view();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "login");
        assert_eq!(app.view.state().search_term, "login");
        // Typing in search mode must not trigger normal-mode bindings.
        assert!(!app.should_quit());
        assert_eq!(app.view.state().sort_field, None);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view.state().search_term, "");

        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "printer");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view.state().search_term, "printe");
    }

    #[test]
    fn esc_resets_everything() {
        let mut app = make_view();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "x");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Esc);
        assert_eq!(*app.view.state(), ViewState::default());
    }

    #[test]
    fn selection_stays_in_range_when_rows_shrink() {
        let mut app = make_view();
        press(&mut app, KeyCode::End);
        assert_eq!(app.table_state.selected(), Some(5));
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.table_state.selected(), Some(0));
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn no_match_renders_empty_state_not_table() {
        let mut app = make_view();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "zzzz");
        press(&mut app, KeyCode::Enter);
        assert!(app.selected_ticket().is_none());

        let screen = render_to_string(&mut app);
        assert!(screen.contains("No tickets found"));
        assert!(!screen.contains("Priority"));
    }

    #[test]
    fn render_shows_tiles_and_sort_arrows() {
        let mut app = make_view();
        press(&mut app, KeyCode::Char('d'));
        let screen = render_to_string(&mut app);
        assert!(screen.contains("All tickets"));
        assert!(screen.contains("Date ↑"));
        assert!(screen.contains("Status ↕"));
    }

    #[test]
    fn enter_opens_detail_pane() {
        let mut app = make_view();
        press(&mut app, KeyCode::Enter);
        assert!(app.show_detail);
        let screen = render_to_string(&mut app);
        assert!(screen.contains("Category"));

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_detail);
    }

    #[test]
    fn q_quits() {
        let mut app = make_view();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
        assert_eq!(truncate("abc", 0), "");
    }
}
