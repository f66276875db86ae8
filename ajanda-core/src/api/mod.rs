//! Typed access to the backend REST API.

pub mod auth;
mod client;
mod endpoint;
pub mod events;
pub mod notes;
pub mod users;

pub use auth::{ForgotPassword, Login, LoginResponse, Register, ResetPassword, VerifyResetCode};
pub use client::ApiClient;
pub use endpoint::{Ack, Endpoint};
pub use events::{
    AddEvent, DeleteEvent, EditEvent, EventNotes, ListCategories, SearchEvents,
};
pub use notes::{AddNote, DeleteNote, EditNote, ListNotes};
pub use users::{ChangePassword, DeleteAccount, EditUser, FetchUser};
