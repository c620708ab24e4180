//! Application state for the clinic REST API.
//!
//! Holds the storage backend and configuration shared by every handler, and
//! hands out the per-resource services.

use std::sync::Arc;

use clinic_persistence::core::{AppointmentStore, DentistStore, PatientStore};
use clinic_persistence::query::Pagination;
use clinic_persistence::services::{AppointmentService, DentistService, PatientService};

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type
///
/// # Example
///
/// ```rust,ignore
/// use clinic_rest::{AppState, ServerConfig};
/// use clinic_persistence::backends::sqlite::SqliteBackend;
/// use std::sync::Arc;
///
/// let backend = SqliteBackend::in_memory()?;
/// let state = AppState::new(Arc::new(backend), ServerConfig::default());
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the pagination used when a listing has no `limit`/`offset`.
    pub fn default_pagination(&self) -> Pagination {
        Pagination::new(self.config.default_page_size, 0)
    }

    /// Returns the maximum page size for listings.
    pub fn max_page_size(&self) -> u32 {
        self.config.max_page_size
    }
}

impl<S: PatientStore> AppState<S> {
    /// Returns the patient service.
    pub fn patients(&self) -> PatientService<S> {
        PatientService::new(Arc::clone(&self.storage))
    }
}

impl<S: DentistStore> AppState<S> {
    /// Returns the dentist service.
    pub fn dentists(&self) -> DentistService<S> {
        DentistService::new(Arc::clone(&self.storage))
    }
}

impl<S> AppState<S>
where
    S: AppointmentStore + PatientStore + DentistStore,
{
    /// Returns the appointment service.
    pub fn appointments(&self) -> AppointmentService<S> {
        AppointmentService::new(Arc::clone(&self.storage))
    }
}
