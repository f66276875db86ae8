//! Same-slot detection.
//!
//! This only compares against the events the client has already fetched.
//! Two clients can still book the same slot at once; the backend is the
//! only thing that could prevent that and it does not.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::model::{Event, EventId};

pub const CONFLICT_MESSAGE: &str = "There is already an event at this date and time";

/// A date plus a time truncated to the minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(NaiveDateTime);

impl Slot {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        let minute = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
        Slot(date.and_time(minute))
    }

    pub fn of(event: &Event) -> Self {
        Self::new(event.date, event.time)
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M"))
    }
}

/// `true` if any existing event sits in the same slot.
pub fn has_conflict(candidate: &Slot, existing: &[Event]) -> bool {
    existing.iter().any(|e| Slot::of(e) == *candidate)
}

/// Like [`has_conflict`], ignoring the event being edited.
pub fn has_conflict_excluding(candidate: &Slot, existing: &[Event], editing: EventId) -> bool {
    existing
        .iter()
        .filter(|e| e.event_id != editing)
        .any(|e| Slot::of(e) == *candidate)
}
