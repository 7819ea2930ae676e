//! helpdesk-core library.
//!
//! # Conventions
//!
//! - **Errors**: typed [`error::HelpdeskError`] for domain failures,
//!   `anyhow::Result` with context for store and config I/O.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod seed;
pub mod source;
pub mod view;
