//! Dental Clinic Persistence Layer
//!
//! This crate owns the clinic's data: the domain types for patients, dentists
//! and appointments, the dynamic filter-to-SQL query builder, the storage
//! traits, and the services that validate and merge updates before they
//! reach a backend.
//!
//! # Backend Features
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! # Architecture
//!
//! - [`query`] - Filter predicates and the paginated query builder
//! - [`types`] - Entities, create payloads, patches and filters
//! - [`error`] - Error types for all operations
//! - [`core`] - Backend and per-resource storage traits
//! - [`services`] - Validation, patch merging and natural-key lookups
//! - [`backends`] - Backend implementations
//!
//! # Filtering
//!
//! Absent filter values are dropped, so an empty filter lists everything:
//!
//! ```
//! use clinic_persistence::query::{Pagination, QueryBuilder};
//! use clinic_persistence::types::{FilterCriteria, PatientFilter};
//!
//! let filter = PatientFilter {
//!     last_name: Some("Lopez".to_string()),
//!     ..Default::default()
//! };
//!
//! let query = QueryBuilder::new("SELECT * FROM patient")
//!     .filter(filter.to_predicate())
//!     .paginate(Pagination::new(20, 40));
//!
//! assert_eq!(
//!     query.render(),
//!     "SELECT * FROM patient WHERE last_name='Lopez' LIMIT 20 OFFSET 40"
//! );
//! ```
//!
//! # Services
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//!
//! use clinic_persistence::backends::sqlite::SqliteBackend;
//! use clinic_persistence::services::DentistService;
//! use clinic_persistence::types::NewDentist;
//!
//! let backend = Arc::new(SqliteBackend::in_memory()?);
//! backend.init_schema()?;
//!
//! let dentists = DentistService::new(backend);
//! let dentist = dentists
//!     .create(NewDentist {
//!         first_name: "Julia".to_string(),
//!         last_name: "Perez".to_string(),
//!         registration_number: 1234,
//!     })
//!     .await?;
//! assert_eq!(dentist.id, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod query;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use query::{Pagination, QueryBuilder};

// Re-export core traits
pub use core::{AppointmentStore, Backend, BackendKind, ClinicStorage, DentistStore, PatientStore};

pub use services::{AppointmentService, DentistService, PatientService};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
