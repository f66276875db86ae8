//! Error types for ajanda.

use thiserror::Error;

/// Errors that can occur in ajanda operations.
///
/// None of these are retried. Every error is terminal for the action that
/// triggered it.
#[derive(Error, Debug)]
pub enum AjandaError {
    /// The request never reached the backend (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Local date/time collision with an existing event.
    #[error("{0}")]
    Conflict(String),

    /// Non-2xx response from the backend.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for AjandaError {
    fn from(e: reqwest::Error) -> Self {
        AjandaError::Network(e.to_string())
    }
}

/// A form field that is missing or malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please choose a category")]
    MissingCategory,

    #[error("Please enter a title")]
    MissingTitle,

    #[error("Please choose a date")]
    MissingDate,

    #[error("Please enter a time")]
    MissingTime,

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown category id {0}")]
    UnknownCategory(i64),

    #[error("Please enter an email address")]
    MissingEmail,

    #[error("The reset code is the number sent to your email, at most 6 digits")]
    InvalidResetCode,

    #[error("Please enter a password")]
    MissingPassword,
}

/// Result type alias for ajanda operations.
pub type AjandaResult<T> = Result<T, AjandaError>;
