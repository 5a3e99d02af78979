use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::error::Error;
use std::fmt;

use crate::repository::{RepoError, RepoResult};

/// The primary error type for the HTTP layer.
///
/// Messages carried by the variants are what clients see. Storage details
/// are logged where the error is produced and never placed in a variant.
#[derive(Debug)]
pub enum AppError {
    /// For internal server errors that are not expected to be handled by the client.
    Internal(anyhow::Error),
    /// For client errors due to invalid requests.
    BadRequest(String),
    /// For when a requested resource is not found.
    NotFound(String),
    /// For when a request carries no valid credentials.
    Unauthorized(String),
    /// For request bodies above the configured size limit.
    PayloadTooLarge(String),
    /// For when the store cannot hand out a connection in time.
    ServiceUnavailable(String),
    /// For when a specific field in a request fails validation.
    ValidationError {
        /// The name of the field that failed validation.
        field: String,
        /// A message describing the validation error.
        message: String,
    },
}

/// Whether a repository call was reading or writing; decides how store
/// failures are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            AppError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            AppError::ValidationError { field, message } => {
                write!(f, "Validation error on field '{}': {}", field, message)
            }
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Internal(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, error_message, details) = match self {
            AppError::Internal(e) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(error_id = %error_id, "Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    Some(json!({ "error_id": error_id.to_string() })),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg, None),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg, None),
            AppError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", msg, None)
            }
            AppError::ValidationError { field, message } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Validation failed for field '{}'", field),
                Some(json!({ "field": field, "message": message })),
            ),
        };

        let mut body = json!({
            "error": {
                "code": error_code,
                "message": error_message,
            },
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        if let Some(details) = details {
            body["error"]["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected JSON body: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    /// Maps a repository failure for `entity` to a client-facing error.
    ///
    /// Missing records are 404. Other store failures are 404 on reads and
    /// 400 on writes, with the driver message kept in the logs only.
    pub fn from_repo(err: RepoError, entity: &str, access: Access) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound(format!("{} not found", entity)),
            RepoError::Database(sqlx::Error::PoolTimedOut) => {
                tracing::error!(entity, "Database connection pool timed out");
                AppError::ServiceUnavailable("Database connection pool timed out".to_string())
            }
            RepoError::Database(e) => match access {
                Access::Read => {
                    tracing::warn!(entity, error = %e, "Read failed");
                    AppError::NotFound(format!("{} not found", entity))
                }
                Access::Write => {
                    tracing::warn!(entity, error = %e, "Write failed");
                    AppError::BadRequest(format!("{} could not be saved", entity))
                }
            },
            RepoError::Hash(msg) => AppError::Internal(anyhow::anyhow!("password hashing failed: {}", msg)),
        }
    }
}

/// A type alias for `Result<T, AppError>`, used throughout the application.
pub type AppResult<T> = Result<T, AppError>;

/// Converts repository results at the router boundary.
pub trait RepoResultExt<T> {
    fn on_read(self, entity: &str) -> AppResult<T>;
    fn on_write(self, entity: &str) -> AppResult<T>;
}

impl<T> RepoResultExt<T> for RepoResult<T> {
    fn on_read(self, entity: &str) -> AppResult<T> {
        self.map_err(|e| AppError::from_repo(e, entity, Access::Read))
    }

    fn on_write(self, entity: &str) -> AppResult<T> {
        self.map_err(|e| AppError::from_repo(e, entity, Access::Write))
    }
}

/// Request field checks shared by the user and signup handlers.
pub mod validation {
    use super::*;

    /// Validates that a string's length (in characters) is within `min..=max`.
    pub fn validate_length(value: &str, field: &str, min: usize, max: usize) -> AppResult<()> {
        let len = value.chars().count();
        if len < min || len > max {
            return Err(AppError::ValidationError {
                field: field.to_string(),
                message: format!("Length must be between {} and {}, got {}", min, max, len),
            });
        }
        Ok(())
    }

    pub fn validate_username(username: &str) -> AppResult<()> {
        validate_length(username.trim(), "username", 3, 32)
    }

    pub fn validate_password(password: &str) -> AppResult<()> {
        validate_length(password, "password", 8, 128)
    }
}
