//! # REST API Errors
//!
//! Error types for the records endpoints and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::schema::{SchemaError, ValidationDetails};
use crate::store::StoreError;

/// Fixed message for payloads that fail the Record shape
pub const VALIDATION_MESSAGE: &str = "Validation failed, correct the form and please try again.";

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Invalid query parameter
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// Limit exceeds maximum
    #[error("Limit {0} exceeds maximum {1}")]
    LimitExceeded(usize, usize),

    /// Request body is not JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Payload does not match the Record shape
    #[error("{}", VALIDATION_MESSAGE)]
    Validation(Vec<ValidationDetails>),

    /// Blank record id
    #[error("Invalid ID format")]
    InvalidId,

    /// No record with the requested id
    #[error("Record not found")]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store failure; the cause is logged, never sent to the client
    #[error("Internal server error")]
    Store(#[from] StoreError),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::InvalidQueryParam(_)
            | RestError::LimitExceeded(_, _)
            | RestError::InvalidBody(_)
            | RestError::Validation(_)
            | RestError::InvalidId => StatusCode::BAD_REQUEST,

            RestError::NotFound => StatusCode::NOT_FOUND,

            RestError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable field issues, empty unless this is a validation error
    pub fn details(&self) -> Vec<String> {
        match self {
            RestError::Validation(issues) => issues.iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<SchemaError> for RestError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::ValidationFailed(issues) => RestError::Validation(issues),
        }
    }
}

/// Error body for the single-record and create endpoints
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        Self {
            details: err.details(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

/// Listing failures render `{"error": ...}` instead of `{"message": ...}`
#[derive(Debug)]
pub struct ListingError(pub RestError);

impl From<RestError> for ListingError {
    fn from(err: RestError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Serialize)]
struct ListingErrorBody {
    error: String,
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let body = Json(ListingErrorBody {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RestError::InvalidQueryParam("page".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(RestError::InvalidId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(RestError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            RestError::Store(StoreError::Io("disk".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_cause_not_exposed() {
        let err = RestError::from(StoreError::Unavailable("secret host 10.0.0.1".to_string()));
        assert_eq!(err.to_string(), "Internal server error");
        assert!(err.details().is_empty());
    }

    #[test]
    fn test_validation_body() {
        let err = RestError::from(SchemaError::ValidationFailed(vec![
            ValidationDetails::missing_field("name"),
        ]));
        let body = serde_json::to_value(ErrorResponse::from(err)).unwrap();

        assert_eq!(body["message"], VALIDATION_MESSAGE);
        assert_eq!(body["details"][0], "name: expected field to be present, got missing");
    }

    #[test]
    fn test_plain_body_has_no_details() {
        let body = serde_json::to_value(ErrorResponse::from(RestError::NotFound)).unwrap();
        assert_eq!(body, serde_json::json!({"message": "Record not found"}));
    }
}
