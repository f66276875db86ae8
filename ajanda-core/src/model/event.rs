//! Events as stored by the backend.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::CategoryKind;
use super::wire;

pub type EventId = i64;

/// A scheduled event (meeting, visit, ceremony, ...).
///
/// The client only ever holds a transient copy; the backend owns the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: EventId,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub category_id: i64,
    pub title: String,
    #[serde(with = "wire::date")]
    pub date: NaiveDate,
    #[serde(with = "wire::time")]
    pub time: NaiveTime,
    #[serde(default, deserialize_with = "wire::non_empty")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "wire::non_empty")]
    pub participant: Option<String>,
    #[serde(default, deserialize_with = "wire::non_empty")]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    /// `None` when the backend returns a category id outside 1..=8.
    pub fn category(&self) -> Option<CategoryKind> {
        CategoryKind::try_from(self.category_id).ok()
    }

    pub fn is_meeting(&self) -> bool {
        self.category() == Some(CategoryKind::Meeting)
    }

    /// Case-insensitive match against title, location, participant and content.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            Some(self.title.as_str()),
            self.location.as_deref(),
            self.participant.as_deref(),
            self.content.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    /// `DD.MM.YYYY`, as shown on the event detail view.
    pub fn display_date(&self) -> String {
        self.date.format("%d.%m.%Y").to_string()
    }

    /// `HH:MM`, seconds dropped.
    pub fn display_time(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    /// This event with an accepted edit applied. Fields the payload leaves
    /// out are cleared, matching what the backend stores.
    pub fn updated_with(&self, payload: EventPayload) -> Event {
        Event {
            category_id: payload.category_id.id(),
            title: payload.title,
            date: payload.date,
            time: payload.time,
            location: payload.location,
            participant: payload.participant,
            content: payload.content,
            ..self.clone()
        }
    }
}

/// Request body for creating or editing an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPayload {
    pub category_id: CategoryKind,
    pub title: String,
    #[serde(with = "wire::date")]
    pub date: NaiveDate,
    #[serde(with = "wire::time")]
    pub time: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
