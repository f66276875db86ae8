//! Client-side form checks run before anything is submitted.

mod conflict;
mod event_form;
mod note_form;

pub use conflict::{CONFLICT_MESSAGE, Slot, has_conflict, has_conflict_excluding};
pub use event_form::EventForm;
pub use note_form::validate_note;
