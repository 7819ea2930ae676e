//! Summary tiles shown above the ticket list.

use serde::Serialize;

use super::{StatusFilter, ViewState};
use crate::model::Ticket;

/// A clickable summary tile: its status shortcut plus a live count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatTile {
    pub filter: StatusFilter,
    pub count: usize,
}

impl StatTile {
    /// Whether this tile is the currently selected status filter.
    #[must_use]
    pub fn is_active(&self, state: &ViewState) -> bool {
        state.status_filter == self.filter
    }
}

/// Count the full, unfiltered ticket set once per tile.
#[must_use]
pub fn stat_tiles(tickets: &[Ticket]) -> [StatTile; 4] {
    StatusFilter::ALL.map(|filter| StatTile {
        filter,
        count: tickets
            .iter()
            .filter(|ticket| filter.matches(ticket.status))
            .count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::view::{SortField, ViewEvent, reduce};

    #[test]
    fn seed_counts_per_tile() {
        let tiles = stat_tiles(&seed::sample_tickets());
        let counts: Vec<(StatusFilter, usize)> =
            tiles.iter().map(|tile| (tile.filter, tile.count)).collect();
        assert_eq!(
            counts,
            [
                (StatusFilter::All, 6),
                (StatusFilter::Open, 3),
                (StatusFilter::InProgress, 2),
                (StatusFilter::Closed, 1),
            ]
        );
    }

    #[test]
    fn counts_ignore_search_and_sort() {
        let tickets = seed::sample_tickets();
        let before = stat_tiles(&tickets);
        let mut state = ViewState::default();
        for event in [
            ViewEvent::SearchChanged("nothing like this".into()),
            ViewEvent::SortColumnClicked(SortField::Date),
        ] {
            state = reduce(state, event);
        }
        assert!(crate::view::visible_tickets(&tickets, &state).is_empty());
        assert_eq!(before, stat_tiles(&tickets));
    }

    #[test]
    fn active_tile_follows_status_filter() {
        let tiles = stat_tiles(&[]);
        let state = reduce(
            ViewState::default(),
            ViewEvent::StatusFilterSelected(StatusFilter::Closed),
        );
        let active: Vec<StatusFilter> = tiles
            .iter()
            .filter(|tile| tile.is_active(&state))
            .map(|tile| tile.filter)
            .collect();
        assert_eq!(active, [StatusFilter::Closed]);
        assert!(tiles.iter().all(|tile| tile.count == 0));
    }
}
