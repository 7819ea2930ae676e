//! Built-in sample tickets used when no store is configured.

use chrono::NaiveDate;

use crate::model::{Priority, Status, Ticket};

struct SeedRow {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    status: Status,
    priority: Priority,
    author: &'static str,
    date: NaiveDate,
    category: &'static str,
    assignee: &'static str,
}

const SEED_ROWS: &[SeedRow] = &[
    SeedRow {
        id: "TK-001",
        title: "Login form rejects valid accounts",
        description: "Users cannot sign in with their email address",
        status: Status::Open,
        priority: Priority::High,
        author: "Marie Dubois",
        date: ymd(2024, 11, 28),
        category: "Bug",
        assignee: "Dev Team",
    },
    SeedRow {
        id: "TK-002",
        title: "New feature: CSV export",
        description: "Allow exporting table data as CSV",
        status: Status::InProgress,
        priority: Priority::Medium,
        author: "Pierre Martin",
        date: ymd(2024, 11, 27),
        category: "Feature",
        assignee: "Backend Team",
    },
    SeedRow {
        id: "TK-003",
        title: "Performance improvements",
        description: "Reduce load time of the home page",
        status: Status::Closed,
        priority: Priority::Low,
        author: "Sophie Laurent",
        date: ymd(2024, 11, 25),
        category: "Enhancement",
        assignee: "Frontend Team",
    },
    SeedRow {
        id: "TK-004",
        title: "Error 500 on profile page",
        description: "Server error when opening the profile page",
        status: Status::Open,
        priority: Priority::High,
        author: "Jean Dupont",
        date: ymd(2024, 11, 29),
        category: "Bug",
        assignee: "Backend Team",
    },
    SeedRow {
        id: "TK-005",
        title: "Missing API documentation",
        description: "Document the REST API endpoints",
        status: Status::InProgress,
        priority: Priority::Medium,
        author: "Claire Bernard",
        date: ymd(2024, 11, 26),
        category: "Documentation",
        assignee: "Tech Writers",
    },
    SeedRow {
        id: "TK-006",
        title: "Upgrade web framework",
        description: "Move the project to the latest framework release",
        status: Status::Open,
        priority: Priority::High,
        author: "Thomas Rousseau",
        date: ymd(2024, 11, 30),
        category: "Enhancement",
        assignee: "Dev Team",
    },
];

/// Seed rows are constants, so an impossible date fails the build.
const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("seed date out of range"),
    }
}

/// The fixed sample collection, in source order.
#[must_use]
pub fn sample_tickets() -> Vec<Ticket> {
    SEED_ROWS
        .iter()
        .map(|row| Ticket {
            id: row.id.to_string(),
            title: row.title.to_string(),
            description: row.description.to_string(),
            status: row.status,
            priority: row.priority,
            author: row.author.to_string(),
            assignee: row.assignee.to_string(),
            date: row.date,
            category: row.category.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{SEED_ROWS, sample_tickets};
    use std::collections::HashSet;

    #[test]
    fn seed_has_six_unique_tickets() {
        let tickets = sample_tickets();
        assert_eq!(tickets.len(), 6);
        let ids: HashSet<&str> = tickets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), tickets.len());
    }

    #[test]
    fn seed_keeps_source_order() {
        let ids: Vec<String> = sample_tickets().into_iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            ["TK-001", "TK-002", "TK-003", "TK-004", "TK-005", "TK-006"]
        );
    }

    #[test]
    fn every_seed_row_becomes_a_ticket_with_its_date() {
        let tickets = sample_tickets();
        assert_eq!(tickets.len(), SEED_ROWS.len());
        let dates: Vec<String> = tickets.iter().map(|t| t.date.to_string()).collect();
        assert_eq!(
            dates,
            [
                "2024-11-28",
                "2024-11-27",
                "2024-11-25",
                "2024-11-29",
                "2024-11-26",
                "2024-11-30"
            ]
        );
    }
}
