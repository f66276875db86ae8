//! Per-screen state holders.
//!
//! Each model owns the working copy of whatever its screen shows, asks the
//! API for fresh data on load and on focus, and derives the lists the
//! presentation layer renders. Loads are split into `begin_load` and
//! `apply`/`fail` so that responses overtaken by a newer request are
//! dropped instead of overwriting newer state.

pub mod calendar;
pub mod detail;
pub mod events;
pub mod generation;
pub mod notes;
pub mod reset;

pub use calendar::{CalendarModel, DayView};
pub use detail::Detail;
pub use events::{EventFilters, EventListModel};
pub use generation::{Generation, Ticket};
pub use notes::{NoteListModel, NoteSource};
pub use reset::{ResetFlow, ResetStep};

use crate::model::Event;

/// Order events by date, then time. Stable: events with the same date and
/// time keep the order the backend returned them in.
pub fn sort_by_schedule(events: &mut [Event]) {
    events.sort_by_key(|e| (e.date, e.time));
}
