//! Error types for the clinic REST API.
//!
//! Every error is rendered as `{"code": "...", "message": "..."}` where
//! `code` is the HTTP reason phrase in snake case.
//!
//! # Error Mapping
//!
//! | Storage Error | HTTP Status |
//! |--------------|-------------|
//! | NotFound | 404 |
//! | AlreadyExists, Conflict | 409 |
//! | ValueExceeded | 422 |
//! | InvalidResource, UnresolvedReference | 422 |
//! | InvalidFilterValue, InvalidPagination | 400 |
//! | QueryError | 400 |
//! | BackendError | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clinic_persistence::error::{
    BackendError, QueryError, ResourceError, StorageError, ValidationError,
};
use serde::Serialize;
use std::fmt;
use tracing::error;

/// Message returned for malformed path ids.
pub const INVALID_ID_MESSAGE: &str = "invalid request, please check input types";

/// Message returned in place of internal failure details.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Resource not found (HTTP 404).
    NotFound {
        /// The resource type (e.g., "patient").
        resource_type: String,
        /// The resource ID.
        id: String,
    },

    /// Bad request - malformed id, filter or pagination (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Missing or wrong API token (HTTP 401).
    Unauthorized {
        /// Error message.
        message: String,
    },

    /// Unique key or reference conflict (HTTP 409).
    Conflict {
        /// Error message.
        message: String,
    },

    /// Unprocessable entity - invalid payload (HTTP 422).
    UnprocessableEntity {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    ///
    /// The message is logged, never sent to the client.
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Shorthand for a malformed path id.
    pub fn invalid_id() -> Self {
        RestError::BadRequest {
            message: INVALID_ID_MESSAGE.to_string(),
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { resource_type, id } => {
                write!(f, "{} not found: {}", resource_type, id)
            }
            RestError::BadRequest { message }
            | RestError::Unauthorized { message }
            | RestError::Conflict { message }
            | RestError::UnprocessableEntity { message }
            | RestError::InternalError { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for RestError {}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Snake-case reason phrase, e.g. `not_found`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Converts a status into its snake-case reason phrase.
pub fn status_code_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unknown")
        .to_lowercase()
        .replace(' ', "_")
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            RestError::InternalError { message } => {
                error!(%message, "Request failed with internal error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            code: status_code_text(status),
            message,
        };
        (status, Json(body)).into_response()
    }
}

// Implement conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(e) => e.into(),
            StorageError::Validation(e) => e.into(),
            StorageError::Query(e) => e.into(),
            StorageError::Backend(e) => e.into(),
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { resource_type, id } => {
                RestError::NotFound { resource_type, id }
            }
            e @ (ResourceError::AlreadyExists { .. } | ResourceError::Conflict { .. }) => {
                RestError::Conflict {
                    message: e.to_string(),
                }
            }
            e @ ResourceError::ValueExceeded { .. } => RestError::UnprocessableEntity {
                message: e.to_string(),
            },
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        match err {
            e @ (ValidationError::InvalidFilterValue { .. }
            | ValidationError::InvalidPagination { .. }) => RestError::BadRequest {
                message: e.to_string(),
            },
            e @ (ValidationError::InvalidResource { .. }
            | ValidationError::UnresolvedReference { .. }) => RestError::UnprocessableEntity {
                message: e.to_string(),
            },
        }
    }
}

impl From<QueryError> for RestError {
    fn from(err: QueryError) -> Self {
        RestError::BadRequest {
            message: err.to_string(),
        }
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

/// Result type for REST operations.
pub type RestResult<T> = Result<T, RestError>;
