//! Handler errors and their HTTP mapping.
//!
//! # Design
//! Clients only ever see a generic marker object (`{"Error": "..."}`); field
//! level validation detail and store failures are logged, not returned.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::store::StoreError;
use crate::validation::ValidationErrors;

pub const INVALID_REQUEST: &str = "Invalid request";
pub const NOT_FOUND: &str = "Not found";
pub const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug)]
pub enum ServiceError {
    /// One or more field rules failed.
    Invalid(ValidationErrors),

    /// No exercise has the requested id.
    NotFound,

    /// The store could not complete the operation.
    Store(StoreError),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Invalid(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn marker(&self) -> &'static str {
        match self {
            ServiceError::Invalid(_) => INVALID_REQUEST,
            ServiceError::NotFound => NOT_FOUND,
            ServiceError::Store(_) => INTERNAL_ERROR,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Invalid(errs) => write!(f, "invalid request: {errs}"),
            ServiceError::NotFound => write!(f, "exercise not found"),
            ServiceError::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Invalid(errs) => Some(errs),
            ServiceError::NotFound => None,
            ServiceError::Store(err) => Some(err),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errs: ValidationErrors) -> Self {
        ServiceError::Invalid(errs)
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Store(err)
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match &self {
            ServiceError::Invalid(errs) => tracing::debug!(errors = %errs, "rejected exercise fields"),
            ServiceError::NotFound => {}
            ServiceError::Store(err) => tracing::error!(error = %err, "store operation failed"),
        }
        (self.status(), Json(json!({ "Error": self.marker() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(ServiceError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServiceError::Store(StoreError::Backend("disk full".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_error_message_is_not_leaked() {
        let err = ServiceError::Store(StoreError::Backend("disk full".to_string()));
        assert_eq!(err.marker(), INTERNAL_ERROR);
        assert!(err.to_string().contains("disk full"));
    }
}
