//! SQLite backend implementation.
//!
//! Supports in-memory databases (for tests) and file databases. Connections
//! come from an r2d2 pool; every pooled connection enforces foreign keys.
//!
//! # Example
//!
//! ```no_run
//! use clinic_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::open("./clinic.db")?;
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE patient (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     first_name TEXT NOT NULL CHECK (length(first_name) <= 50),
//!     last_name TEXT NOT NULL CHECK (length(last_name) <= 50),
//!     address TEXT NOT NULL CHECK (length(address) <= 100),
//!     dni INTEGER NOT NULL UNIQUE,
//!     discharge_date TEXT NOT NULL
//! );
//!
//! CREATE TABLE dentist (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     first_name TEXT NOT NULL CHECK (length(first_name) <= 50),
//!     last_name TEXT NOT NULL CHECK (length(last_name) <= 50),
//!     registration_number INTEGER NOT NULL UNIQUE
//! );
//!
//! CREATE TABLE appointment (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     patient_id INTEGER NOT NULL REFERENCES patient (id) ON DELETE RESTRICT,
//!     dentist_id INTEGER NOT NULL REFERENCES dentist (id) ON DELETE RESTRICT,
//!     date TEXT NOT NULL,
//!     description TEXT NOT NULL DEFAULT '' CHECK (length(description) <= 255)
//! );
//! ```
//!
//! Datetimes are stored as `YYYY-MM-DD HH:MM:SS` text so that range filters
//! compare lexicographically.

mod appointment;
mod backend;
mod dentist;
mod patient;
mod schema;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use schema::SCHEMA_VERSION;
