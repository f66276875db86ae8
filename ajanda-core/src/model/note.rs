//! Free-text notes, optionally attached to a meeting event.

use serde::{Deserialize, Serialize};

use super::event::EventId;

pub type NoteId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub note_id: NoteId,
    /// Back-reference to a meeting; the note is not owned by the event.
    #[serde(default)]
    pub event_id: Option<EventId>,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Whether a note stands alone or belongs to a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Personal,
    Meeting(EventId),
}

impl Note {
    pub fn kind(&self) -> NoteKind {
        match self.event_id {
            Some(id) => NoteKind::Meeting(id),
            None => NoteKind::Personal,
        }
    }

    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
    }
}

/// Request body for creating or editing a note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotePayload {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
}

impl From<&Note> for NotePayload {
    fn from(note: &Note) -> Self {
        NotePayload {
            title: note.title.clone(),
            content: note.content.clone(),
            event_id: note.event_id,
        }
    }
}
