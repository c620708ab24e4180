//! SQLite schema definitions and migrations.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 2;

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, 1)?;
        migrate_schema(conn, 1)?;
    } else if current_version < SCHEMA_VERSION {
        migrate_schema(conn, current_version)?;
    }

    Ok(())
}

fn migration_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::MigrationError { message })
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| migration_error(format!("Failed to create schema_version table: {}", e)))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| migration_error(format!("Failed to clear schema_version: {}", e)))?;

    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )
    .map_err(|e| migration_error(format!("Failed to set schema_version: {}", e)))?;

    Ok(())
}

/// Create the initial tables.
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS patient (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL CHECK (length(first_name) <= 50),
            last_name TEXT NOT NULL CHECK (length(last_name) <= 50),
            address TEXT NOT NULL CHECK (length(address) <= 100),
            dni INTEGER NOT NULL UNIQUE,
            discharge_date TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS dentist (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL CHECK (length(first_name) <= 50),
            last_name TEXT NOT NULL CHECK (length(last_name) <= 50),
            registration_number INTEGER NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS appointment (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            patient_id INTEGER NOT NULL REFERENCES patient (id) ON DELETE RESTRICT,
            dentist_id INTEGER NOT NULL REFERENCES dentist (id) ON DELETE RESTRICT,
            date TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '' CHECK (length(description) <= 255)
        );
        ",
    )
    .map_err(|e| migration_error(format!("Failed to create tables: {}", e)))
}

/// Run migrations from `from_version` up to [`SCHEMA_VERSION`].
fn migrate_schema(conn: &Connection, from_version: i32) -> StorageResult<()> {
    let mut version = from_version;

    while version < SCHEMA_VERSION {
        match version {
            1 => migrate_v1_to_v2(conn)?,
            _ => {
                return Err(migration_error(format!(
                    "Unknown schema version: {}",
                    version
                )));
            }
        }
        version += 1;
        set_schema_version(conn, version)?;
    }

    Ok(())
}

/// Migrate from schema version 1 to version 2.
///
/// Adds indexes for the listing filters on appointments.
fn migrate_v1_to_v2(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_appointment_patient ON appointment (patient_id);
        CREATE INDEX IF NOT EXISTS idx_appointment_dentist ON appointment (dentist_id);
        CREATE INDEX IF NOT EXISTS idx_appointment_date ON appointment (date);
        ",
    )
    .map_err(|e| migration_error(format!("Failed to create appointment indexes: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(conn: &Connection, kind: &str) -> Vec<String> {
        conn.prepare("SELECT name FROM sqlite_master WHERE type = ?1 ORDER BY name")
            .unwrap()
            .query_map([kind], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect()
    }

    #[test]
    fn test_schema_initialization() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let tables = names(&conn, "table");
        assert!(tables.contains(&"patient".to_string()));
        assert!(tables.contains(&"dentist".to_string()));
        assert!(tables.contains(&"appointment".to_string()));
        assert!(tables.contains(&"schema_version".to_string()));
    }

    #[test]
    fn test_schema_version() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize_schema(&conn).unwrap();
        initialize_schema(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_migration_v1_to_v2() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema_v1(&conn).unwrap();
        let _ = get_schema_version(&conn).unwrap();
        set_schema_version(&conn, 1).unwrap();
        assert!(!names(&conn, "index").contains(&"idx_appointment_date".to_string()));

        initialize_schema(&conn).unwrap();

        assert!(names(&conn, "index").contains(&"idx_appointment_date".to_string()));
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }
}
