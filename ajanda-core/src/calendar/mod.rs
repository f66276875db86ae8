//! Month grid computation.
//!
//! Pure date arithmetic: no I/O, no clock access. "Today" is always passed
//! in so the grid can be computed for any reference date.

use std::collections::HashSet;

use chrono::{Datelike, Months, NaiveDate};

use crate::model::Event;
use crate::viewmodel::sort_by_schedule;

/// A year plus a zero-indexed month (0 = January, 11 = December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    /// `None` when `month0` is not in 0..=11 or the year is out of range.
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        let month = month0.checked_add(1)?;
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| MonthCursor { first })
    }

    /// The month a date falls in.
    pub fn containing(date: NaiveDate) -> Self {
        MonthCursor {
            first: date - chrono::Duration::days(i64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Zero-indexed month.
    pub fn month0(&self) -> u32 {
        self.first.month0()
    }

    /// One-indexed month, for display.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Following month; December rolls over to January of the next year.
    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| MonthCursor { first })
            .unwrap_or(self)
    }

    /// Preceding month; January rolls back to December of the previous year.
    pub fn prev(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| MonthCursor { first })
            .unwrap_or(self)
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first + chrono::Duration::days(i64::from(self.days_in_month()) - 1)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            // Only reachable at chrono's upper bound, which is a December
            None => 31,
        }
    }

    /// Empty cells before day 1 in a Monday-first week.
    ///
    /// Sunday (0 in a Sunday-first count) maps to 6, every other weekday
    /// shifts down by one.
    pub fn leading_blanks(&self) -> u32 {
        match self.first.weekday().num_days_from_sunday() {
            0 => 6,
            n => n - 1,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month0() == self.month0()
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year(), self.month(), day)
    }
}

/// One slot in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Padding before the first day so weeks start on Monday.
    Blank,
    Day(DayCell),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub has_event: bool,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

impl Cell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            Cell::Day(day) => Some(day),
            Cell::Blank => None,
        }
    }
}

/// Lay out a month: leading blanks, then one cell per day.
pub fn render_month(month: MonthCursor, events: &[Event], today: NaiveDate) -> Vec<Cell> {
    let event_days: HashSet<NaiveDate> = events.iter().map(|e| e.date).collect();
    let blanks = month.leading_blanks() as usize;

    let mut cells = Vec::with_capacity(blanks + month.days_in_month() as usize);
    cells.extend(std::iter::repeat_n(Cell::Blank, blanks));
    cells.extend(
        month
            .first_day()
            .iter_days()
            .take(month.days_in_month() as usize)
            .map(|date| {
                Cell::Day(DayCell {
                    date,
                    is_today: date == today,
                    has_event: event_days.contains(&date),
                })
            }),
    );

    cells
}

/// Events falling on `date`, ordered by time. Works on an already-fetched
/// list; nothing is re-requested.
pub fn day_events(date: NaiveDate, events: &[Event]) -> Vec<Event> {
    let mut day: Vec<Event> = events.iter().filter(|e| e.date == date).cloned().collect();
    sort_by_schedule(&mut day);
    day
}
