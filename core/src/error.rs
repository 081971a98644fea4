//! Error types for the exercise API client.
//!
//! # Design
//! `NotFound` and `InvalidRequest` get dedicated variants because they are
//! the two failures the service documents (404 and 400). All other non-2xx
//! responses land in `HttpError` with the raw status code and body.

use std::fmt;

/// Errors returned by `ExerciseClient` parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404: the requested exercise does not exist.
    NotFound,

    /// The server returned 400: the submitted fields failed validation.
    InvalidRequest,

    /// The server returned another unexpected status.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl ApiError {
    /// HTTP status behind this error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::InvalidRequest => Some(400),
            ApiError::HttpError { status, .. } => Some(*status),
            ApiError::DeserializationError(_) | ApiError::SerializationError(_) => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "exercise not found"),
            ApiError::InvalidRequest => write!(f, "invalid request"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
