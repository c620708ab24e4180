//! Backend abstraction for database drivers.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::BackendError;

/// Identifies the type of database backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// SQLite database (file-based or in-memory).
    Sqlite,
    /// Custom or unknown backend.
    Custom(&'static str),
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Sqlite => write!(f, "sqlite"),
            BackendKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// A database backend.
///
/// Connection pooling is an implementation detail of each backend; callers
/// only see identity, health and schema management.
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    /// Returns the kind of backend.
    fn kind(&self) -> BackendKind;

    /// Returns a human-readable name for this backend.
    fn name(&self) -> &'static str;

    /// Checks if the backend is healthy and accepting connections.
    async fn health_check(&self) -> Result<(), BackendError>;

    /// Initializes the database schema if needed.
    async fn initialize(&self) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_display() {
        assert_eq!(BackendKind::Sqlite.to_string(), "sqlite");
        assert_eq!(BackendKind::Custom("mysql").to_string(), "mysql");
    }
}
