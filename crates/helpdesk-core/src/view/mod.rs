//! Ticket list view: filter, sort, and stat tiles over an immutable ticket set.
//!
//! All UI state lives in a single [`ViewState`] value. User interaction is
//! expressed as [`ViewEvent`]s folded through the pure [`reduce`] function,
//! and everything a renderer draws is derived from `(tickets, state)`:
//!
//! - [`visible_tickets`]: filtered, then optionally sorted, borrowed rows
//! - [`stats::stat_tiles`]: per-status counts over the *unfiltered* set
//!
//! Nothing here performs I/O or can fail once a [`TicketView`] is built.

pub mod filter;
pub mod sort;
pub mod stats;

use std::collections::HashSet;
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::HelpdeskError;
use crate::model::ticket::normalize;
use crate::model::{ParseEnumError, Status, Ticket};

pub use stats::{StatTile, stat_tiles};

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

/// Status restriction applied to the list; `All` disables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    InProgress,
    Closed,
}

impl StatusFilter {
    /// Tile order used by every renderer.
    pub const ALL: [Self; 4] = [Self::All, Self::Open, Self::InProgress, Self::Closed];

    /// The single status this filter admits, or `None` for `All`.
    #[must_use]
    pub const fn status(self) -> Option<Status> {
        match self {
            Self::All => None,
            Self::Open => Some(Status::Open),
            Self::InProgress => Some(Status::InProgress),
            Self::Closed => Some(Status::Closed),
        }
    }

    #[must_use]
    pub fn matches(self, status: Status) -> bool {
        self.status().is_none_or(|wanted| wanted == status)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self.status() {
            None => "all",
            Some(status) => status.as_str(),
        }
    }

    /// Tile caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All tickets",
            Self::Open => "Open",
            Self::InProgress => "In progress",
            Self::Closed => "Closed",
        }
    }
}

impl From<Status> for StatusFilter {
    fn from(status: Status) -> Self {
        match status {
            Status::Open => Self::Open,
            Status::InProgress => Self::InProgress,
            Status::Closed => Self::Closed,
        }
    }
}

/// Column a user can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Status,
    Priority,
    Date,
}

impl SortField {
    pub const ALL: [Self; 3] = [Self::Status, Self::Priority, Self::Date];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Date => "date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Header arrow a renderer draws next to a sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

impl SortIndicator {
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Unsorted => "↕",
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

/// Transient state of one open ticket list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    /// Case-insensitive substring matched against title, description, and id.
    pub search_term: String,
    pub status_filter: StatusFilter,
    /// `None` keeps the source order.
    pub sort_field: Option<SortField>,
    pub sort_direction: SortDirection,
}

impl ViewState {
    #[must_use]
    pub fn sort_indicator(&self, field: SortField) -> SortIndicator {
        match (self.sort_field, self.sort_direction) {
            (Some(active), SortDirection::Ascending) if active == field => {
                SortIndicator::Ascending
            }
            (Some(active), SortDirection::Descending) if active == field => {
                SortIndicator::Descending
            }
            _ => SortIndicator::Unsorted,
        }
    }

    /// Returns true if no filter criteria are active (sorting is not a filter).
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty() && self.status_filter == StatusFilter::All
    }
}

// ---------------------------------------------------------------------------
// Events and reducer
// ---------------------------------------------------------------------------

/// A single user interaction with the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The search box now holds this text.
    SearchChanged(String),
    /// A stat tile (or the status control) was clicked.
    StatusFilterSelected(StatusFilter),
    /// A sortable column header was clicked.
    SortColumnClicked(SortField),
    /// Back to the defaults the view opened with.
    Reset,
}

/// Fold one event into the state.
#[must_use]
pub fn reduce(state: ViewState, event: ViewEvent) -> ViewState {
    match event {
        ViewEvent::SearchChanged(search_term) => ViewState {
            search_term,
            ..state
        },
        ViewEvent::StatusFilterSelected(status_filter) => ViewState {
            status_filter,
            ..state
        },
        ViewEvent::SortColumnClicked(field) => {
            if state.sort_field == Some(field) {
                ViewState {
                    sort_direction: state.sort_direction.flip(),
                    ..state
                }
            } else {
                ViewState {
                    sort_field: Some(field),
                    sort_direction: SortDirection::Ascending,
                    ..state
                }
            }
        }
        ViewEvent::Reset => ViewState::default(),
    }
}

/// Run the filter step, then the sort step when a sort field is set.
#[must_use]
pub fn visible_tickets<'a>(tickets: &'a [Ticket], state: &ViewState) -> Vec<&'a Ticket> {
    let mut rows = filter::filter_tickets(tickets, state);
    if let Some(field) = state.sort_field {
        sort::sort_tickets(&mut rows, field, state.sort_direction);
    }
    rows
}

// ---------------------------------------------------------------------------
// TicketView
// ---------------------------------------------------------------------------

/// One list session: the fixed ticket set plus the state that drives it.
#[derive(Debug, Clone)]
pub struct TicketView {
    tickets: Vec<Ticket>,
    state: ViewState,
}

impl TicketView {
    /// Open a view over `tickets` with default state.
    ///
    /// # Errors
    ///
    /// Returns [`HelpdeskError::DuplicateTicketId`] if two tickets share an id.
    pub fn new(tickets: Vec<Ticket>) -> Result<Self, HelpdeskError> {
        let mut seen = HashSet::with_capacity(tickets.len());
        for ticket in &tickets {
            if !seen.insert(ticket.id.as_str()) {
                return Err(HelpdeskError::DuplicateTicketId {
                    id: ticket.id.clone(),
                });
            }
        }
        tracing::debug!(count = tickets.len(), "ticket view opened");
        Ok(Self {
            tickets,
            state: ViewState::default(),
        })
    }

    #[must_use]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn dispatch(&mut self, event: ViewEvent) {
        tracing::trace!(?event, "view event");
        self.state = reduce(std::mem::take(&mut self.state), event);
    }

    /// Rows to render, in display order. Empty means "no results".
    #[must_use]
    pub fn visible(&self) -> Vec<&Ticket> {
        visible_tickets(&self.tickets, &self.state)
    }

    #[must_use]
    pub fn stat_tiles(&self) -> [StatTile; 4] {
        stat_tiles(&self.tickets)
    }
}

// ---------------------------------------------------------------------------
// Text forms
// ---------------------------------------------------------------------------

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if normalize(s) == "all" {
            return Ok(Self::All);
        }
        s.parse::<Status>().map(Self::from).map_err(|_| ParseEnumError {
            expected: "status filter",
            got: s.to_string(),
        })
    }
}

impl FromStr for SortField {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "status" => Ok(Self::Status),
            "priority" => Ok(Self::Priority),
            "date" => Ok(Self::Date),
            _ => Err(ParseEnumError {
                expected: "sort field",
                got: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use chrono::NaiveDate;

    fn make_ticket(id: &str, status: Status) -> Ticket {
        Ticket {
            id: id.to_string(),
            title: format!("Ticket {id}"),
            description: String::new(),
            status,
            priority: Priority::Medium,
            author: "tester".into(),
            assignee: "Support".into(),
            date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            category: "Bug".into(),
        }
    }

    #[test]
    fn default_state_matches_view_open_defaults() {
        let state = ViewState::default();
        assert_eq!(state.search_term, "");
        assert_eq!(state.status_filter, StatusFilter::All);
        assert_eq!(state.sort_field, None);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
        assert!(state.is_unfiltered());
    }

    #[test]
    fn clicking_same_column_twice_flips_direction() {
        let state = reduce(
            ViewState::default(),
            ViewEvent::SortColumnClicked(SortField::Priority),
        );
        assert_eq!(state.sort_field, Some(SortField::Priority));
        assert_eq!(state.sort_direction, SortDirection::Ascending);

        let state = reduce(state, ViewEvent::SortColumnClicked(SortField::Priority));
        assert_eq!(state.sort_field, Some(SortField::Priority));
        assert_eq!(state.sort_direction, SortDirection::Descending);

        let state = reduce(state, ViewEvent::SortColumnClicked(SortField::Priority));
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn clicking_other_column_resets_to_ascending() {
        let mut state = ViewState::default();
        for event in [
            ViewEvent::SortColumnClicked(SortField::Date),
            ViewEvent::SortColumnClicked(SortField::Date),
        ] {
            state = reduce(state, event);
        }
        assert_eq!(state.sort_direction, SortDirection::Descending);

        let state = reduce(state, ViewEvent::SortColumnClicked(SortField::Status));
        assert_eq!(state.sort_field, Some(SortField::Status));
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn tile_click_only_touches_status_filter() {
        let state = ViewState {
            search_term: "login".into(),
            status_filter: StatusFilter::All,
            sort_field: Some(SortField::Date),
            sort_direction: SortDirection::Descending,
        };
        let next = reduce(
            state.clone(),
            ViewEvent::StatusFilterSelected(StatusFilter::Closed),
        );
        assert_eq!(next.status_filter, StatusFilter::Closed);
        assert_eq!(next.search_term, state.search_term);
        assert_eq!(next.sort_field, state.sort_field);
        assert_eq!(next.sort_direction, state.sort_direction);
    }

    #[test]
    fn reset_restores_defaults() {
        let state = ViewState {
            search_term: "x".into(),
            status_filter: StatusFilter::Open,
            sort_field: Some(SortField::Priority),
            sort_direction: SortDirection::Descending,
        };
        assert_eq!(reduce(state, ViewEvent::Reset), ViewState::default());
    }

    #[test]
    fn sort_indicator_tracks_active_column() {
        let mut state = ViewState::default();
        assert_eq!(
            state.sort_indicator(SortField::Date),
            SortIndicator::Unsorted
        );
        state = reduce(state, ViewEvent::SortColumnClicked(SortField::Date));
        assert_eq!(
            state.sort_indicator(SortField::Date),
            SortIndicator::Ascending
        );
        assert_eq!(
            state.sort_indicator(SortField::Priority),
            SortIndicator::Unsorted
        );
        state = reduce(state, ViewEvent::SortColumnClicked(SortField::Date));
        assert_eq!(
            state.sort_indicator(SortField::Date),
            SortIndicator::Descending
        );
    }

    #[test]
    fn ticket_view_rejects_duplicate_ids() {
        let err = TicketView::new(vec![
            make_ticket("TK-001", Status::Open),
            make_ticket("TK-001", Status::Closed),
        ])
        .unwrap_err();
        assert!(matches!(err, HelpdeskError::DuplicateTicketId { ref id } if id == "TK-001"));
    }

    #[test]
    fn ticket_view_dispatch_updates_visible_rows() {
        let mut view = TicketView::new(vec![
            make_ticket("TK-001", Status::Open),
            make_ticket("TK-002", Status::Closed),
        ])
        .unwrap();
        assert_eq!(view.visible().len(), 2);

        view.dispatch(ViewEvent::StatusFilterSelected(StatusFilter::Closed));
        let ids: Vec<&str> = view.visible().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["TK-002"]);

        view.dispatch(ViewEvent::SearchChanged("nothing matches".into()));
        assert!(view.visible().is_empty());

        // Tiles keep counting the full set.
        let tiles = view.stat_tiles();
        assert_eq!(tiles[0].count, 2);
    }

    #[test]
    fn status_filter_parses_all_and_statuses() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "In-Progress".parse::<StatusFilter>().unwrap(),
            StatusFilter::InProgress
        );
        let err = "pending".parse::<StatusFilter>().unwrap_err();
        assert_eq!(err.expected, "status filter");
    }

    #[test]
    fn sort_field_parses_known_columns() {
        for field in SortField::ALL {
            assert_eq!(field.to_string().parse::<SortField>().unwrap(), field);
        }
        assert!("assignee".parse::<SortField>().is_err());
    }
}
