//! API error handling
//!
//! Every failure leaves the API as `{ "error": { "code": <int>, "message": <string> } }`
//! with `code` equal to the HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inv_core::error::ValidationErrors;
use inv_db::DbError;
use serde::Serialize;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Validation(ValidationErrors),
    NotFound(String),
    MethodNotAllowed(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ApiError::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    /// Log an unexpected data access failure and wrap it.
    ///
    /// Constraint violations become 409; everything else is a 500 carrying
    /// the driver message.
    pub fn from_db(error: DbError, action: &str) -> Self {
        tracing::error!(error = %error, action, "database operation failed");

        if error.is_integrity_violation() {
            return ApiError::Conflict(format!(
                "The operation conflicts with existing data while {}. Detail: {}",
                action, error
            ));
        }
        ApiError::Internal(format!(
            "An internal error occurred while {}. Detail: {}",
            action, error
        ))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Validation(errors) => errors.to_string(),
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::MethodNotAllowed(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg) => msg.clone(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.into())
    }
}

#[derive(Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let envelope = ErrorEnvelope {
            error: ErrorBody {
                code: status.as_u16(),
                message: self.message(),
            },
        };

        (status, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Attach the failed action to a data access result
pub trait DbResultExt<T> {
    fn or_internal(self, action: &str) -> ApiResult<T>;
}

impl<T> DbResultExt<T> for Result<T, DbError> {
    fn or_internal(self, action: &str) -> ApiResult<T> {
        self.map_err(|e| ApiError::from_db(e, action))
    }
}
