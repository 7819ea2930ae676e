//! Filter step of the ticket list pipeline.

use super::ViewState;
use crate::model::Ticket;

/// Returns true if the ticket passes the status filter and the search term.
///
/// The search term matches case-insensitively as a substring of the title,
/// description, or id. An empty term matches everything.
#[must_use]
pub fn matches(ticket: &Ticket, state: &ViewState) -> bool {
    if !state.status_filter.matches(ticket.status) {
        return false;
    }
    if state.search_term.is_empty() {
        return true;
    }
    matches_search(ticket, &state.search_term.to_lowercase())
}

/// `needle` must already be lowercased.
fn matches_search(ticket: &Ticket, needle: &str) -> bool {
    [&ticket.title, &ticket.description, &ticket.id]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Borrow every ticket that passes [`matches`], preserving input order.
#[must_use]
pub fn filter_tickets<'a>(tickets: &'a [Ticket], state: &ViewState) -> Vec<&'a Ticket> {
    if state.search_term.is_empty() {
        return tickets
            .iter()
            .filter(|ticket| state.status_filter.matches(ticket.status))
            .collect();
    }

    let needle = state.search_term.to_lowercase();
    tickets
        .iter()
        .filter(|ticket| state.status_filter.matches(ticket.status))
        .filter(|ticket| matches_search(ticket, &needle))
        .collect()
}
