//! Headless testing helpers: Pilot, event log, page fixtures, markup snapshots.
//!
//! Use the [`Pilot`] to drive a [`Document`](crate::document::Document) the
//! way a user would (clicks, key presses, focus) and [`EventLog`] to record
//! widget lifecycle events in order. [`render_markup`] prints a subtree as
//! indented HTML-like text for readable assertions.

pub mod fixtures;
pub mod log;
pub mod pilot;
pub mod snapshot;

pub use log::EventLog;
pub use pilot::Pilot;
pub use snapshot::render_markup;
