//! Domain records shared by the view pipeline, the store, and renderers.

pub mod ticket;

pub use ticket::{ParseEnumError, Priority, Status, Ticket};
