//! Client logic for the ajanda events, meetings and notes service.
//!
//! This crate holds everything a front end needs apart from drawing:
//! - `session` for the authenticated-user context and token persistence
//! - `api` for typed calls against the backend REST API
//! - `viewmodel` for per-screen state (lists, calendar, detail editing, password reset)
//! - `calendar` for month grid arithmetic
//! - `form` for event and note validation and slot conflicts

pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod session;
pub mod viewmodel;

pub use error::{AjandaError, AjandaResult, ValidationError};
pub use model::*;
