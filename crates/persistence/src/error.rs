//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! following a hierarchy that separates resource state errors, validation
//! errors, query construction errors and backend errors.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::fmt;

use thiserror::Error;

/// The primary error type for all storage operations.
///
/// This enum encompasses all possible errors that can occur during persistence
/// operations, organized by category.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Resource state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Query construction errors
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns true if this error reports a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Resource(ResourceError::NotFound { .. }))
    }
}

/// Errors related to resource state.
///
/// These mirror the constraint failures a relational store reports and are
/// produced by the backends when translating driver errors.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("{resource_type} not found: {id}")]
    NotFound { resource_type: String, id: String },

    /// A unique key (id, DNI, registration number) is already taken.
    #[error("{resource_type} already exists: {message}")]
    AlreadyExists {
        resource_type: String,
        message: String,
    },

    /// A foreign key constraint rejected the operation.
    #[error("constraint conflict on {resource_type}: {message}")]
    Conflict {
        resource_type: String,
        message: String,
    },

    /// An attribute value exceeds the limits of its column.
    #[error("attribute value exceeds type limit on {resource_type}: {message}")]
    ValueExceeded {
        resource_type: String,
        message: String,
    },
}

/// Errors related to validation of payloads and filter input.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The payload failed validation.
    #[error("invalid {resource_type}: {}", join_details(.details))]
    InvalidResource {
        resource_type: String,
        details: Vec<ValidationDetail>,
    },

    /// A filter parameter could not be parsed into its typed form.
    #[error("invalid value '{value}' for filter '{field}': {message}")]
    InvalidFilterValue {
        field: String,
        value: String,
        message: String,
    },

    /// A pagination parameter is out of range or malformed.
    #[error("invalid pagination parameter '{parameter}': {message}")]
    InvalidPagination { parameter: String, message: String },

    /// A lookup key in the payload does not resolve to an existing resource.
    #[error("no {resource_type} found with {field} {value}")]
    UnresolvedReference {
        resource_type: String,
        field: String,
        value: String,
    },
}

/// Detailed validation error information for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetail {
    /// The payload field that failed validation.
    pub field: String,
    /// A human-readable error message.
    pub message: String,
}

impl ValidationDetail {
    /// Creates a new validation detail.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

fn join_details(details: &[ValidationDetail]) -> String {
    details
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while assembling predicates and queries.
#[derive(Error, Debug)]
pub enum QueryError {
    /// A predicate value of a type outside the accepted set reached the builder.
    #[error("unsupported predicate value type: {type_name}")]
    UnsupportedValueType { type_name: String },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Connection pool exhausted.
    #[error("connection pool exhausted for {backend_name}")]
    PoolExhausted { backend_name: String },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(_err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::PoolExhausted {
            backend_name: "sqlite".to_string(),
        })
    }
}
