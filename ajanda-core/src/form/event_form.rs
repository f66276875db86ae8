//! Add/edit event form.

use chrono::NaiveDate;

use super::conflict::{CONFLICT_MESSAGE, Slot, has_conflict, has_conflict_excluding};
use crate::error::{AjandaError, AjandaResult, ValidationError};
use crate::model::wire::parse_time;
use crate::model::{CategoryKind, Event, EventId, EventPayload, FieldSet, OptionalField};

/// What the user has typed so far. Everything is optional until validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventForm {
    pub category: Option<CategoryKind>,
    pub title: String,
    pub date: Option<NaiveDate>,
    /// `HH:MM`, as typed.
    pub time: String,
    pub location: String,
    pub participant: String,
    pub content: String,
}

impl From<&Event> for EventForm {
    fn from(event: &Event) -> Self {
        EventForm {
            category: event.category(),
            title: event.title.clone(),
            date: Some(event.date),
            time: event.display_time(),
            location: event.location.clone().unwrap_or_default(),
            participant: event.participant.clone().unwrap_or_default(),
            content: event.content.clone().unwrap_or_default(),
        }
    }
}

impl EventForm {
    /// Optional fields to show for the chosen category.
    pub fn fields(&self) -> FieldSet {
        self.category.map_or(FieldSet::NONE, CategoryKind::fields)
    }

    /// Check required fields in the order the form shows them: category,
    /// title, date, time. Optional fields the category does not expose are
    /// left out of the payload even if they were filled in earlier.
    pub fn validate(&self) -> Result<EventPayload, ValidationError> {
        let category = self.category.ok_or(ValidationError::MissingCategory)?;

        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let date = self.date.ok_or(ValidationError::MissingDate)?;

        let time = self.time.trim();
        if time.is_empty() {
            return Err(ValidationError::MissingTime);
        }
        let time = parse_time(time).ok_or_else(|| ValidationError::InvalidTime(time.to_string()))?;

        let fields = category.fields();
        let optional = |field: OptionalField, value: &str| {
            let value = value.trim();
            (fields.contains(field) && !value.is_empty()).then(|| value.to_string())
        };

        Ok(EventPayload {
            category_id: category,
            title: title.to_string(),
            date,
            time,
            location: optional(OptionalField::Location, &self.location),
            participant: optional(OptionalField::Participant, &self.participant),
            content: Some(self.content.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        })
    }

    /// Validate, then check the slot against `existing`. When editing, the
    /// event itself is skipped.
    pub fn prepare(&self, existing: &[Event], editing: Option<EventId>) -> AjandaResult<EventPayload> {
        let payload = self.validate()?;
        let slot = Slot::new(payload.date, payload.time);

        let taken = match editing {
            Some(id) => has_conflict_excluding(&slot, existing, id),
            None => has_conflict(&slot, existing),
        };
        if taken {
            tracing::debug!(%slot, "slot already taken");
            return Err(AjandaError::Conflict(CONFLICT_MESSAGE.to_string()));
        }

        Ok(payload)
    }
}
