//! Note endpoints.

use reqwest::Method;
use serde::Serialize;

use super::endpoint::{Ack, Endpoint};
use crate::model::{Note, NoteId, NotePayload};

/// `GET /notes`: every note of the current user.
#[derive(Debug, Serialize)]
pub struct ListNotes;

impl Endpoint for ListNotes {
    type Response = Vec<Note>;

    fn method() -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/notes".into()
    }
}

/// `POST /notes`
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct AddNote(pub NotePayload);

impl Endpoint for AddNote {
    type Response = Ack;

    fn method() -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "/notes".into()
    }
}

/// `PUT /notes/{id}`
#[derive(Debug, Serialize)]
pub struct EditNote {
    #[serde(skip)]
    pub note_id: NoteId,
    #[serde(flatten)]
    pub note: NotePayload,
}

impl Endpoint for EditNote {
    type Response = Ack;

    fn method() -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("/notes/{}", self.note_id)
    }
}

/// `DELETE /notes/{id}`
#[derive(Debug, Serialize)]
pub struct DeleteNote {
    #[serde(skip)]
    pub note_id: NoteId,
}

impl Endpoint for DeleteNote {
    type Response = Ack;

    fn method() -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("/notes/{}", self.note_id)
    }
}
