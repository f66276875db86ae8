//! Event list screens (all events, meetings).

use chrono::NaiveDate;

use super::generation::{Generation, Ticket};
use super::sort_by_schedule;
use crate::api::{ApiClient, SearchEvents};
use crate::error::{AjandaError, AjandaResult};
use crate::model::{CategoryKind, Event};
use crate::session::Session;

/// Filters chosen on the filter sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilters {
    pub category: Option<CategoryKind>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Applied locally after the fetch.
    pub search: String,
}

/// State behind an event list.
///
/// A list may be pinned to one category (the meetings screen is the event
/// list pinned to `Meeting`); a pinned category overrides whatever the
/// filters ask for.
#[derive(Debug, Default)]
pub struct EventListModel {
    pinned: Option<CategoryKind>,
    filters: EventFilters,
    events: Vec<Event>,
    last_error: Option<String>,
    generation: Generation,
}

impl EventListModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pinned_to(category: CategoryKind) -> Self {
        EventListModel {
            pinned: Some(category),
            ..Self::default()
        }
    }

    pub fn meetings() -> Self {
        Self::pinned_to(CategoryKind::Meeting)
    }

    pub fn filters(&self) -> &EventFilters {
        &self.filters
    }

    /// Replace the filters. Returns `true` when the backend query changed and
    /// the list has to be fetched again; a search-only change is local.
    pub fn apply_filters(&mut self, filters: EventFilters) -> bool {
        let before = self.query();
        self.filters = filters;
        self.query() != before
    }

    /// The backend half of the filters.
    pub fn query(&self) -> SearchEvents {
        SearchEvents {
            category: self.pinned.or(self.filters.category),
            start_date: self.filters.start_date,
            end_date: self.filters.end_date,
        }
    }

    pub fn begin_load(&mut self) -> (Ticket, SearchEvents) {
        (self.generation.begin(), self.query())
    }

    /// Store a fetched list. Returns `false` if the response was stale and dropped.
    pub fn apply(&mut self, ticket: Ticket, mut events: Vec<Event>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!(?ticket, "dropping stale event list");
            return false;
        }

        sort_by_schedule(&mut events);
        self.events = events;
        self.last_error = None;
        true
    }

    /// Record a failed fetch. The previous list stays visible.
    pub fn fail(&mut self, ticket: Ticket, error: &AjandaError) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!(?ticket, "dropping stale event list error");
            return false;
        }

        tracing::warn!(%error, "failed to load events");
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

    /// The screen came back into view; whatever changed elsewhere is picked up
    /// by fetching again.
    pub async fn on_focus(&mut self, api: &ApiClient, session: &Session) -> AjandaResult<()> {
        self.load(api, session).await
    }

    /// The screen is gone; late responses are ignored from now on.
    pub fn close(&mut self) {
        self.generation.close();
    }

    /// Everything fetched, ordered by date then time.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Fetched events narrowed by the local text search.
    pub fn visible(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.matches_text(&self.filters.search))
            .collect()
    }

    pub fn find(&self, event_id: i64) -> Option<&Event> {
        self.events.iter().find(|e| e.event_id == event_id)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
