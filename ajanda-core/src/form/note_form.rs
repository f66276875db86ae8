use crate::error::ValidationError;
use crate::model::NotePayload;

/// A note needs a title; content may be empty.
pub fn validate_note(note: &NotePayload) -> Result<(), ValidationError> {
    if note.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    Ok(())
}
