//! HTTP error types for the loan portal server.
//!
//! Maps domain errors from `loanportal-core` into HTTP responses. Every
//! error produces a JSON body with a machine-readable `error` field and a
//! human-readable `message`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use loanportal_core::error::{CatalogError, ParseTagError, ValidationError};

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Requested resource or environment not found.
    NotFound(String),
    /// Client sent invalid input.
    BadRequest(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

// Malformed or incomplete request bodies get the same JSON shape as every
// other error instead of axum's plain-text rejection.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.notice().to_owned())
    }
}

impl From<ParseTagError> for AppError {
    fn from(err: ParseTagError) -> Self {
        Self::NotFound(err.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CollectionNotFound { .. }
            | CatalogError::SectionNotFound { .. }
            | CatalogError::NoProfile { .. }
            | CatalogError::NoEnvironmentFile { .. } => Self::NotFound(err.to_string()),
        }
    }
}
