//! SQLite backend implementation.

use std::fmt::{Debug, Display};
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, Row, ffi};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{Backend, BackendKind};
use crate::error::{BackendError, ResourceError, StorageError, StorageResult};
use crate::types::datetime;

use super::schema;

const BACKEND_NAME: &str = "sqlite";

/// SQLite backend for the clinic tables.
pub struct SqliteBackend {
    pool: Pool<SqliteConnectionManager>,
    config: SqliteBackendConfig,
    is_memory: bool,
}

impl Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("config", &self.config)
            .field("is_memory", &self.is_memory)
            .finish_non_exhaustive()
    }
}

/// Configuration for the SQLite backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteBackendConfig {
    /// Maximum number of connections in the pool.
    ///
    /// Ignored for in-memory databases, which always use one connection.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of idle connections.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,

    /// Enable WAL mode for file databases.
    #[serde(default = "default_true")]
    pub enable_wal: bool,

    /// Enable foreign key constraints.
    #[serde(default = "default_true")]
    pub enable_foreign_keys: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout_ms() -> u64 {
    30000
}

fn default_busy_timeout_ms() -> u32 {
    5000
}

fn default_true() -> bool {
    true
}

impl Default for SqliteBackendConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout_ms: default_connection_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
            enable_wal: true,
            enable_foreign_keys: true,
        }
    }
}

impl SqliteBackend {
    /// Creates a new in-memory SQLite backend.
    pub fn in_memory() -> StorageResult<Self> {
        Self::with_config(":memory:", SqliteBackendConfig::default())
    }

    /// Opens or creates a file-based SQLite database.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        Self::with_config(path, SqliteBackendConfig::default())
    }

    /// Creates a backend with custom configuration.
    pub fn with_config<P: AsRef<Path>>(
        path: P,
        config: SqliteBackendConfig,
    ) -> StorageResult<Self> {
        let is_memory = path.as_ref().to_string_lossy() == ":memory:";

        let busy_timeout = Duration::from_millis(u64::from(config.busy_timeout_ms));
        let enable_foreign_keys = config.enable_foreign_keys;
        let enable_wal = config.enable_wal && !is_memory;
        let manager = SqliteConnectionManager::file(path.as_ref()).with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            if enable_foreign_keys {
                conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            }
            if enable_wal {
                conn.query_row("PRAGMA journal_mode = WAL", [], |row| {
                    row.get::<_, String>(0)
                })?;
            }
            Ok(())
        });

        let builder = Pool::builder()
            .connection_timeout(Duration::from_millis(config.connection_timeout_ms));
        // Each in-memory connection would open its own database, so the
        // single connection must never be recycled.
        let builder = if is_memory {
            builder
                .max_size(1)
                .min_idle(Some(1))
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            builder
                .max_size(config.max_connections)
                .min_idle(Some(config.min_connections))
        };

        let pool = builder
            .build(manager)
            .map_err(|e| {
                StorageError::Backend(BackendError::ConnectionFailed {
                    backend_name: BACKEND_NAME.to_string(),
                    message: e.to_string(),
                })
            })?;

        info!(
            path = %path.as_ref().display(),
            is_memory,
            max_connections = pool.max_size(),
            "Opened SQLite database"
        );

        Ok(Self {
            pool,
            config,
            is_memory,
        })
    }

    /// Initialize the database schema.
    pub fn init_schema(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;
        schema::initialize_schema(&conn)
    }

    /// Get a connection from the pool.
    pub(crate) fn get_connection(
        &self,
    ) -> StorageResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| {
            StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: BACKEND_NAME.to_string(),
                message: e.to_string(),
            })
        })
    }

    /// Runs `f` with a pooled connection on the blocking thread pool.
    pub(crate) async fn with_connection<T, F>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            f(&conn)
        })
        .await
        .map_err(|e| internal_error(format!("blocking task failed: {}", e)))?
    }

    /// Returns whether this is an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.is_memory
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &SqliteBackendConfig {
        &self.config
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        let conn = self
            .get_connection()
            .map_err(|_| BackendError::Unavailable {
                backend_name: BACKEND_NAME.to_string(),
                message: "Failed to get connection".to_string(),
            })?;
        conn.query_row("SELECT 1", [], |_| Ok(()))
            .map_err(|e| BackendError::Internal {
                backend_name: BACKEND_NAME.to_string(),
                message: format!("Health check failed: {}", e),
                source: None,
            })?;
        Ok(())
    }

    async fn initialize(&self) -> Result<(), BackendError> {
        self.init_schema().map_err(|e| BackendError::MigrationError {
            message: format!("Failed to initialize schema: {}", e),
        })
    }
}

pub(crate) fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: BACKEND_NAME.to_string(),
        message,
        source: None,
    })
}

/// Reads a canonical datetime text column.
pub(crate) fn datetime_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    datetime::parse(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn not_found(resource_type: &str, id: impl Display) -> StorageError {
    StorageError::Resource(ResourceError::NotFound {
        resource_type: resource_type.to_string(),
        id: id.to_string(),
    })
}

/// Translates a driver error into the storage taxonomy.
///
/// Constraint violations carry the offending resource type; anything the
/// caller cannot act on becomes an opaque backend error.
pub(crate) fn map_sqlite_error(resource_type: &str, err: rusqlite::Error) -> StorageError {
    let rusqlite::Error::SqliteFailure(failure, message) = &err else {
        return err.into();
    };
    let message = message.clone().unwrap_or_else(|| failure.to_string());
    debug!(resource_type, code = failure.extended_code, %message, "SQLite failure");

    let resource_type = resource_type.to_string();
    match (failure.code, failure.extended_code) {
        (ErrorCode::ConstraintViolation, ffi::SQLITE_CONSTRAINT_UNIQUE)
        | (ErrorCode::ConstraintViolation, ffi::SQLITE_CONSTRAINT_PRIMARYKEY) => {
            StorageError::Resource(ResourceError::AlreadyExists {
                resource_type,
                message,
            })
        }
        (ErrorCode::ConstraintViolation, ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => {
            StorageError::Resource(ResourceError::Conflict {
                resource_type,
                message,
            })
        }
        (ErrorCode::ConstraintViolation, ffi::SQLITE_CONSTRAINT_CHECK) | (ErrorCode::TooBig, _) => {
            StorageError::Resource(ResourceError::ValueExceeded {
                resource_type,
                message,
            })
        }
        _ => err.into(),
    }
}
