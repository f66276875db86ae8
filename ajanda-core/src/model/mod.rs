//! Entities owned by the backend. The client only holds working copies.

pub mod category;
pub mod event;
pub mod note;
pub mod user;
pub mod wire;

pub use category::{Category, CategoryKind, FieldSet, OptionalField};
pub use event::{Event, EventId, EventPayload};
pub use note::{Note, NoteId, NoteKind, NotePayload};
pub use user::{AuthSession, NewUser, ProfileUpdate, User};
