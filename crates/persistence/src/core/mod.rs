//! Core storage traits and abstractions.
//!
//! This module provides the foundational traits for the persistence layer:
//!
//! - [`Backend`] - Database driver abstraction (identity, health, schema)
//! - [`PatientStore`], [`DentistStore`], [`AppointmentStore`] - Per-resource CRUD
//! - [`ClinicStorage`] - Everything the REST layer needs, as one bound
//!
//! # Trait Hierarchy
//!
//! ```text
//! Backend
//!     └── ClinicStorage
//!             ├── PatientStore
//!             ├── DentistStore
//!             └── AppointmentStore
//! ```
//!
//! Stores receive fully-validated entities. Validation, patch merging and
//! cross-resource lookups live in [`crate::services`].

pub mod backend;
pub mod storage;

pub use backend::{Backend, BackendKind};
pub use storage::{AppointmentStore, ClinicStorage, DentistStore, PatientStore};
