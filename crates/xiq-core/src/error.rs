//! Error types for XIQ client operations.
//!
//! Errors fall into three groups: rejected configuration values
//! ([`Error::OutOfRange`], [`Error::ConfigError`], [`Error::ValidationError`]),
//! requests that could not be assembled ([`Error::RequestConstruction`]) and
//! failures reported by the HTTP transport ([`Error::Transport`]). Nothing is
//! retried or suppressed; every failure is handed back to the caller.

use thiserror::Error;

/// Main error type for XIQ client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A numeric setting was outside its accepted range
    #[error("{field} out of range ({min} - {max}): {value}")]
    OutOfRange {
        /// Name of the rejected setting
        field: &'static str,
        /// Rejected value
        value: u64,
        /// Smallest accepted value
        min: u64,
        /// Largest accepted value
        max: u64,
    },

    /// The outbound request could not be built
    #[error("could not create request: {0}")]
    RequestConstruction(String),

    /// The HTTP transport failed; the inner error is passed through untouched
    #[error("HTTP transport failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Configuration document could not be read
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration document failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Specialized result type for XIQ client operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "OUT_OF_RANGE",
            Self::RequestConstruction(_) => "REQUEST_CONSTRUCTION",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
        }
    }

    /// Build the error reported for a rejected timeout.
    #[must_use]
    pub const fn timeout_out_of_range(value: u64, min: u64, max: u64) -> Self {
        Self::OutOfRange {
            field: "timeout",
            value,
            min,
            max,
        }
    }

    /// Returns the underlying transport error, if this is one.
    #[must_use]
    pub const fn as_transport(&self) -> Option<&reqwest::Error> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }

    /// Consumes the error and returns the underlying transport error, if this is one.
    #[must_use]
    pub fn into_transport(self) -> Option<reqwest::Error> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::RequestConstruction(format!("invalid URL: {err}"))
    }
}

impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::RequestConstruction(format!("invalid header value: {err}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}
