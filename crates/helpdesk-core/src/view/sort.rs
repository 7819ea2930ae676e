//! Sort step of the ticket list pipeline.

use std::cmp::Ordering;

use super::{SortDirection, SortField};
use crate::model::Ticket;

/// Compare two tickets by `field` in `direction`.
///
/// Ties fall back to `id` ascending regardless of direction, so the output
/// order never depends on the incoming order.
#[must_use]
pub fn compare(a: &Ticket, b: &Ticket, field: SortField, direction: SortDirection) -> Ordering {
    let primary = match field {
        SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortField::Status => a.status.rank().cmp(&b.status.rank()),
        SortField::Date => a.date.cmp(&b.date),
    };
    let primary = match direction {
        SortDirection::Ascending => primary,
        SortDirection::Descending => primary.reverse(),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// Sort a slice of borrowed tickets in place.
pub fn sort_tickets(rows: &mut [&Ticket], field: SortField, direction: SortDirection) {
    rows.sort_by(|a, b| compare(a, b, field, direction));
}
