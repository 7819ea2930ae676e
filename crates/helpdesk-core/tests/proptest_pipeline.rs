use helpdesk_core::model::Ticket;
use helpdesk_core::view::{
    SortDirection, SortField, StatusFilter, ViewEvent, ViewState, reduce, stat_tiles,
    visible_tickets,
};
use proptest::prelude::*;

use generators::*;

fn contains_term(ticket: &Ticket, term: &str) -> bool {
    let needle = term.to_lowercase();
    [&ticket.title, &ticket.description, &ticket.id]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn ids(rows: &[&Ticket]) -> Vec<String> {
    rows.iter().map(|t| t.id.clone()).collect()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        max_global_rejects: 8192,
        ..proptest::test_runner::Config::with_cases(512)
    })]

    #[test]
    fn default_filter_is_identity(tickets in arb_tickets()) {
        let rows = visible_tickets(&tickets, &ViewState::default());
        let expected: Vec<&Ticket> = tickets.iter().collect();
        prop_assert_eq!(rows, expected);
    }

    #[test]
    fn status_filter_selects_exact_subset(
        tickets in arb_tickets(),
        filter in arb_status_filter(),
    ) {
        let state = reduce(ViewState::default(), ViewEvent::StatusFilterSelected(filter));
        let rows = visible_tickets(&tickets, &state);
        let expected: Vec<&Ticket> = tickets
            .iter()
            .filter(|t| filter.status().is_none_or(|s| s == t.status))
            .collect();
        prop_assert_eq!(rows, expected);
    }

    #[test]
    fn search_partitions_by_containment(
        tickets in arb_tickets(),
        term in "[a-cA-Cé]{1,3}",
    ) {
        let state = reduce(ViewState::default(), ViewEvent::SearchChanged(term.clone()));
        let rows = visible_tickets(&tickets, &state);
        let shown = ids(&rows);

        for ticket in &tickets {
            prop_assert_eq!(
                shown.contains(&ticket.id),
                contains_term(ticket, &term),
                "ticket {} disagrees with term {:?}", ticket.id, term
            );
        }
    }

    #[test]
    fn sorting_only_reorders_the_filtered_set(
        tickets in arb_tickets(),
        state in arb_state(),
    ) {
        let unsorted = ViewState { sort_field: None, ..state.clone() };
        let mut filtered = ids(&visible_tickets(&tickets, &unsorted));
        let mut sorted = ids(&visible_tickets(&tickets, &state));
        filtered.sort();
        sorted.sort();
        prop_assert_eq!(filtered, sorted);
    }

    #[test]
    fn sorted_output_is_ordered_with_id_tiebreak(
        tickets in arb_tickets(),
        field in arb_sort_field(),
        descending in any::<bool>(),
    ) {
        let mut state = reduce(ViewState::default(), ViewEvent::SortColumnClicked(field));
        if descending {
            state = reduce(state, ViewEvent::SortColumnClicked(field));
        }
        let rows = visible_tickets(&tickets, &state);

        for pair in rows.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let primary = match field {
                SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
                SortField::Status => a.status.rank().cmp(&b.status.rank()),
                SortField::Date => a.date.cmp(&b.date),
            };
            let primary = if descending { primary.reverse() } else { primary };
            prop_assert!(primary.is_le(), "{} before {} out of order", a.id, b.id);
            if primary.is_eq() {
                prop_assert!(a.id < b.id, "tie {} / {} not broken by id", a.id, b.id);
            }
        }
    }

    #[test]
    fn same_column_twice_flips_only_direction(
        state in arb_state(),
        field in arb_sort_field(),
    ) {
        let once = reduce(state, ViewEvent::SortColumnClicked(field));
        prop_assert_eq!(once.sort_field, Some(field));
        let twice = reduce(once.clone(), ViewEvent::SortColumnClicked(field));
        prop_assert_eq!(twice.sort_field, Some(field));
        prop_assert_eq!(twice.sort_direction, once.sort_direction.flip());
        prop_assert_eq!(&twice.search_term, &once.search_term);
        prop_assert_eq!(twice.status_filter, once.status_filter);
    }

    #[test]
    fn other_column_resets_to_ascending(
        state in arb_state(),
        field in arb_sort_field(),
    ) {
        prop_assume!(state.sort_field.is_some_and(|active| active != field));
        let next = reduce(state, ViewEvent::SortColumnClicked(field));
        prop_assert_eq!(next.sort_field, Some(field));
        prop_assert_eq!(next.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn tile_counts_ignore_view_state(
        tickets in arb_tickets(),
        state in arb_state(),
    ) {
        let tiles = stat_tiles(&tickets);
        prop_assert_eq!(tiles[0].filter, StatusFilter::All);
        prop_assert_eq!(tiles[0].count, tickets.len());
        prop_assert_eq!(tiles[1].count + tiles[2].count + tiles[3].count, tickets.len());

        // The view state never reaches the tile computation, but its visible
        // rows must still be a subset of what the tiles count.
        let active = tiles.iter().find(|t| t.is_active(&state)).map(|t| t.count);
        prop_assert!(active.is_some());
        prop_assert!(visible_tickets(&tickets, &state).len() <= active.unwrap_or(0));
    }

    #[test]
    fn reset_restores_defaults(state in arb_state()) {
        prop_assert_eq!(reduce(state, ViewEvent::Reset), ViewState::default());
    }
}

#[test]
fn unmatched_search_yields_empty_sequence() {
    let tickets = helpdesk_core::seed::sample_tickets();
    let state = reduce(
        ViewState::default(),
        ViewEvent::SearchChanged("zzz-no-such-ticket".into()),
    );
    assert!(visible_tickets(&tickets, &state).is_empty());
}
