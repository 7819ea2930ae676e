//! Where a ticket view gets its fixed collection from.

use std::path::{Path, PathBuf};
use std::{fmt, str::FromStr};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::db;
use crate::model::ticket::normalize;
use crate::model::{ParseEnumError, Ticket};
use crate::seed;

/// Supplies the tickets a view is opened with. Loaded once per view.
pub trait TicketSource {
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load(&self) -> Result<Vec<Ticket>>;
}

/// The built-in sample collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedSource;

impl TicketSource for SeedSource {
    fn load(&self) -> Result<Vec<Ticket>> {
        Ok(seed::sample_tickets())
    }
}

/// Tickets created through `hd create`, read from the SQLite store.
#[derive(Debug, Clone)]
pub struct StoreSource {
    path: PathBuf,
}

impl StoreSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TicketSource for StoreSource {
    fn load(&self) -> Result<Vec<Ticket>> {
        let conn = db::open_existing_store(&self.path)?;
        let stored = db::query::list_tickets(&conn)
            .with_context(|| format!("load tickets from {}", self.path.display()))?;
        tracing::debug!(count = stored.len(), "loaded tickets from store");
        Ok(stored.into_iter().map(|row| row.ticket).collect())
    }
}

/// Which [`TicketSource`] a command should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Seed,
    Store,
}

impl SourceKind {
    /// Build the source; `store_path` is only used for [`SourceKind::Store`].
    #[must_use]
    pub fn open(self, store_path: &Path) -> Box<dyn TicketSource> {
        match self {
            Self::Seed => Box::new(SeedSource),
            Self::Store => Box::new(StoreSource::new(store_path)),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Seed => "seed",
            Self::Store => "store",
        })
    }
}

impl FromStr for SourceKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "seed" => Ok(Self::Seed),
            "store" | "db" => Ok(Self::Store),
            _ => Err(ParseEnumError {
                expected: "ticket source",
                got: s.to_string(),
            }),
        }
    }
}
