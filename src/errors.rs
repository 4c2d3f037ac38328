// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every failure a route can surface maps to one of these.
/// Unresolvable ids inside a search are not errors and never reach this enum.
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Body is not JSON, is empty, or is missing a required key
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Backing store failed (database, file persistence, document decoding)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PlacesError {
    pub fn not_json() -> Self {
        PlacesError::BadRequest("Not a JSON".to_string())
    }

    pub fn missing(field: &str) -> Self {
        PlacesError::BadRequest(format!("Missing {}", field))
    }
}

impl From<validator::ValidationErrors> for PlacesError {
    fn from(e: validator::ValidationErrors) -> Self {
        PlacesError::BadRequest(e.to_string())
    }
}

/// Convert PlacesError to HTTP response
/// DOCUMENTATION: Keeps the `{"error": ...}` body shape clients of the API expect
impl ResponseError for PlacesError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            PlacesError::NotFound(_) => json!({ "error": "Not found" }),
            PlacesError::BadRequest(message) => json!({
                "error": "Bad Request",
                "message": message,
            }),
            PlacesError::Storage(_) => json!({ "error": "Internal Server Error" }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PlacesError::NotFound(_) => StatusCode::NOT_FOUND,
            PlacesError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PlacesError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
