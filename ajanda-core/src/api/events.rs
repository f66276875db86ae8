//! Event and category endpoints.

use chrono::NaiveDate;
use reqwest::Method;
use serde::Serialize;

use super::endpoint::{Ack, Endpoint};
use crate::model::{Category, CategoryKind, Event, EventId, EventPayload, Note};

/// `GET /event-categories`
#[derive(Debug, Serialize)]
pub struct ListCategories;

impl Endpoint for ListCategories {
    type Response = Vec<Category>;

    fn method() -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/event-categories".into()
    }
}

/// `GET /events/search`
///
/// Category and date range are filtered by the backend. Text search and
/// ordering happen locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchEvents {
    pub category: Option<CategoryKind>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Endpoint for SearchEvents {
    type Response = Vec<Event>;

    fn method() -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/events/search".into()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(category) = self.category {
            query.push(("category_id", category.id().to_string()));
        }
        if let Some(start) = self.start_date {
            query.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            query.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        query
    }
}

/// `POST /events`
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct AddEvent(pub EventPayload);

impl Endpoint for AddEvent {
    type Response = Ack;

    fn method() -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/events".into()
    }
}

/// `PUT /events/{id}`
#[derive(Debug, Serialize)]
pub struct EditEvent {
    #[serde(skip)]
    pub event_id: EventId,
    #[serde(flatten)]
    pub event: EventPayload,
}

impl Endpoint for EditEvent {
    type Response = Ack;

    fn method() -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("/events/{}", self.event_id)
    }
}

/// `DELETE /events/{id}`
#[derive(Debug, Serialize)]
pub struct DeleteEvent {
    #[serde(skip)]
    pub event_id: EventId,
}

impl Endpoint for DeleteEvent {
    type Response = Ack;

    fn method() -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("/events/{}", self.event_id)
    }
}

/// `GET /events/{id}/notes`
#[derive(Debug, Serialize)]
pub struct EventNotes {
    #[serde(skip)]
    pub event_id: EventId,
}

impl Endpoint for EventNotes {
    type Response = Vec<Note>;

    fn method() -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("/events/{}/notes", self.event_id)
    }
}
