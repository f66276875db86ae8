//! Calendar screen: one month of events plus the day drill-down.

use chrono::{Local, NaiveDate};

use super::generation::{Generation, Ticket};
use crate::api::{ApiClient, SearchEvents};
use crate::calendar::{Cell, MonthCursor, day_events, render_month};
use crate::error::{AjandaError, AjandaResult};
use crate::model::Event;
use crate::session::Session;

/// What the day-detail view receives: the date and that day's events,
/// taken from the month already on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub date: NaiveDate,
    pub events: Vec<Event>,
}

#[derive(Debug)]
pub struct CalendarModel {
    month: MonthCursor,
    events: Vec<Event>,
    last_error: Option<String>,
    generation: Generation,
}

impl CalendarModel {
    pub fn new(month: MonthCursor) -> Self {
        CalendarModel {
            month,
            events: Vec::new(),
            last_error: None,
            generation: Generation::default(),
        }
    }

    /// Opens on the current month.
    pub fn this_month() -> Self {
        Self::new(MonthCursor::containing(Local::now().date_naive()))
    }

    pub fn month(&self) -> MonthCursor {
        self.month
    }

    /// Move forward a month. The previous month's events are dropped and any
    /// load still in flight for it becomes stale.
    pub fn next_month(&mut self) {
        self.go_to(self.month.next());
    }

    pub fn prev_month(&mut self) {
        self.go_to(self.month.prev());
    }

    pub fn go_to(&mut self, month: MonthCursor) {
        if month != self.month {
            self.month = month;
            self.events.clear();
            // Invalidate outstanding tickets for the old month
            self.generation.begin();
        }
    }

    /// Query covering exactly the visible month.
    pub fn query(&self) -> SearchEvents {
        SearchEvents {
            category: None,
            start_date: Some(self.month.first_day()),
            end_date: Some(self.month.last_day()),
        }
    }

    pub fn begin_load(&mut self) -> (Ticket, SearchEvents) {
        (self.generation.begin(), self.query())
    }

    pub fn apply(&mut self, ticket: Ticket, events: Vec<Event>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!(?ticket, "dropping stale month");
            return false;
        }

        // Range filtering is the backend's job, but only this month can be drawn
        let month = self.month;
        self.events = events.into_iter().filter(|e| month.contains(e.date)).collect();
        self.last_error = None;
        true
    }

    pub fn fail(&mut self, ticket: Ticket, error: &AjandaError) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }

        tracing::warn!(%error, "failed to load month");
        self.last_error = Some(error.to_string());
        true
    }

    pub async fn load(&mut self, api: &ApiClient, session: &Session) -> AjandaResult<()> {
        let (ticket, query) = self.begin_load();

        match api.call(session, query).await {
            Ok(events) => {
                self.apply(ticket, events);
                Ok(())
            }
            Err(e) => {
                self.fail(ticket, &e);
                Err(e)
            }
        }
    }

    pub async fn on_focus(&mut self, api: &ApiClient, session: &Session) -> AjandaResult<()> {
        self.load(api, session).await
    }

    pub fn close(&mut self) {
        self.generation.close();
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn cells(&self, today: NaiveDate) -> Vec<Cell> {
        render_month(self.month, &self.events, today)
    }

    /// Tap on a day cell. `None` if the day does not exist in this month.
    pub fn select_day(&self, day: u32) -> Option<DayView> {
        let date = self.month.day(day)?;
        Some(DayView {
            date,
            events: day_events(date, &self.events),
        })
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
