//! Note list screens.

use super::generation::{Generation, Ticket};
use crate::api::{ApiClient, EventNotes, ListNotes};
use crate::error::{AjandaError, AjandaResult};
use crate::model::{EventId, Note, NoteKind};
use crate::session::Session;

/// Which notes a list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoteSource {
    /// Every note of the user, personal and meeting alike.
    #[default]
    All,
    /// Notes attached to one event.
    Event(EventId),
}

#[derive(Debug, Default)]
pub struct NoteListModel {
    source: NoteSource,
    search: String,
    notes: Vec<Note>,
    last_error: Option<String>,
    generation: Generation,
}

impl NoteListModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_event(event_id: EventId) -> Self {
        NoteListModel {
            source: NoteSource::Event(event_id),
            ..Self::default()
        }
    }

    pub fn source(&self) -> NoteSource {
        self.source
    }

    /// Text search is always local.
    pub fn apply_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.generation.begin()
    }

    pub fn apply(&mut self, ticket: Ticket, notes: Vec<Note>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!(?ticket, "dropping stale note list");
            return false;
        }

        self.notes = notes;
        self.last_error = None;
        true
    }

    pub fn fail(&mut self, ticket: Ticket, error: &AjandaError) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!(?ticket, "dropping stale note list error");
            return false;
        }

        tracing::warn!(%error, "failed to load notes");
        self.last_error = Some(error.to_string());
        true
    }

    pub async fn load(&mut self, api: &ApiClient, session: &Session) -> AjandaResult<()> {
        let ticket = self.begin_load();

        let result = match self.source {
            NoteSource::All => api.call(session, ListNotes).await,
            NoteSource::Event(event_id) => api.call(session, EventNotes { event_id }).await,
        };

        match result {
            Ok(notes) => {
                self.apply(ticket, notes);
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

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn visible(&self) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|n| n.matches_text(&self.search))
            .collect()
    }

    /// Visible notes with no meeting attached.
    pub fn personal(&self) -> Vec<&Note> {
        self.visible()
            .into_iter()
            .filter(|n| n.kind() == NoteKind::Personal)
            .collect()
    }

    /// Visible notes attached to a meeting.
    pub fn meeting(&self) -> Vec<&Note> {
        self.visible()
            .into_iter()
            .filter(|n| matches!(n.kind(), NoteKind::Meeting(_)))
            .collect()
    }

    pub fn find(&self, note_id: i64) -> Option<&Note> {
        self.notes.iter().find(|n| n.note_id == note_id)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
