//! Dentist service.

use std::sync::Arc;

use tracing::debug;

use crate::core::DentistStore;
use crate::error::StorageResult;
use crate::query::Pagination;
use crate::types::{Dentist, DentistFilter, DentistPatch, NewDentist, Patch};

/// Business operations on dentists.
pub struct DentistService<S> {
    store: Arc<S>,
}

impl<S> Clone for DentistService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DentistStore> DentistService<S> {
    /// Creates a service over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lists dentists matching `filter`.
    pub async fn list(
        &self,
        filter: &DentistFilter,
        pagination: Pagination,
    ) -> StorageResult<Vec<Dentist>> {
        self.store.list_dentists(filter, pagination).await
    }

    /// Reads a dentist by id.
    pub async fn get(&self, id: i64) -> StorageResult<Dentist> {
        self.store.get_dentist(id).await
    }

    /// Validates and inserts a new dentist.
    pub async fn create(&self, new: NewDentist) -> StorageResult<Dentist> {
        new.validate()?;
        self.store.create_dentist(new).await
    }

    /// Validates and fully replaces the dentist stored under `id`.
    pub async fn replace(&self, id: i64, new: NewDentist) -> StorageResult<Dentist> {
        new.validate()?;
        self.store.update_dentist(new.into_dentist(id)).await
    }

    /// Merges `patch` over the current dentist and stores the result.
    pub async fn patch(&self, id: i64, patch: &DentistPatch) -> StorageResult<Dentist> {
        patch.validate()?;
        let existing = self.store.get_dentist(id).await?;

        if patch.is_empty() {
            debug!(id, "Empty dentist patch, returning current state");
            return Ok(existing);
        }

        self.store.update_dentist(patch.apply(existing)).await
    }

    /// Deletes a dentist.
    pub async fn delete(&self, id: i64) -> StorageResult<()> {
        self.store.delete_dentist(id).await
    }
}
