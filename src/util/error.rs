use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors surfaced by the service layer. Validation is the only category
/// the client branches on; everything else collapses to a generic message
/// at the handler boundary while the detail stays in the server logs.
#[derive(Debug, Clone)]
pub enum ServiceError {
    Validation(Vec<String>),
    NotFound(String),
    InternalError(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Validation(errors) => {
                write!(f, "Validation failed: {}", errors.join("; "))
            }
            ServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ServiceError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<crate::repository::repository_error::RepositoryError> for ServiceError {
    fn from(err: crate::repository::repository_error::RepositoryError) -> Self {
        use crate::repository::repository_error::RepositoryError;
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::ValidationError(msg) => ServiceError::Validation(vec![msg]),
            RepositoryError::AlreadyExists(msg) => ServiceError::InternalError(msg),
            RepositoryError::DatabaseError(msg) => ServiceError::InternalError(msg),
            RepositoryError::ConnectionError(msg) => ServiceError::InternalError(msg),
            RepositoryError::SerializationError(msg) => ServiceError::InternalError(msg),
            RepositoryError::Generic(e) => ServiceError::InternalError(e.to_string()),
        }
    }
}

/// Message shown whenever the real cause must not leak to the caller.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Failure response for the quote intake endpoints:
/// `{ "success": false, "errors": [...] }`.
#[derive(Debug)]
pub struct QuoteIntakeError {
    pub status: StatusCode,
    pub errors: Vec<String>,
}

impl QuoteIntakeError {
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            errors: vec![message.to_string()],
        }
    }

    pub fn validation(errors: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            errors,
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            errors: vec![message.to_string()],
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            errors: vec![GENERIC_FAILURE_MESSAGE.to_string()],
        }
    }
}

impl std::fmt::Display for QuoteIntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.errors.join("; "))
    }
}

impl std::error::Error for QuoteIntakeError {}

impl From<ServiceError> for QuoteIntakeError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => QuoteIntakeError::validation(errors),
            ServiceError::NotFound(_) => QuoteIntakeError::not_found("Quote request not found"),
            ServiceError::InternalError(_) => QuoteIntakeError::internal(),
        }
    }
}

impl IntoResponse for QuoteIntakeError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "errors": self.errors,
        }));
        (self.status, body).into_response()
    }
}

/// Failure response for the contact endpoint: `{ "error": "..." }`.
#[derive(Debug)]
pub struct ContactIntakeError {
    pub status: StatusCode,
    pub error: String,
}

impl ContactIntakeError {
    pub fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: message,
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl std::fmt::Display for ContactIntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.error)
    }
}

impl std::error::Error for ContactIntakeError {}

impl From<ServiceError> for ContactIntakeError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => ContactIntakeError::bad_request(errors.join("; ")),
            ServiceError::NotFound(_) | ServiceError::InternalError(_) => {
                ContactIntakeError::internal()
            }
        }
    }
}

impl IntoResponse for ContactIntakeError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.error }));
        (self.status, body).into_response()
    }
}
