//! Patient service.

use std::sync::Arc;

use tracing::debug;

use crate::core::PatientStore;
use crate::error::StorageResult;
use crate::query::Pagination;
use crate::types::{NewPatient, Patch, Patient, PatientFilter, PatientPatch};

/// Business operations on patients.
pub struct PatientService<S> {
    store: Arc<S>,
}

impl<S> Clone for PatientService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: PatientStore> PatientService<S> {
    /// Creates a service over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lists patients matching `filter`.
    pub async fn list(
        &self,
        filter: &PatientFilter,
        pagination: Pagination,
    ) -> StorageResult<Vec<Patient>> {
        self.store.list_patients(filter, pagination).await
    }

    /// Reads a patient by id.
    pub async fn get(&self, id: i64) -> StorageResult<Patient> {
        self.store.get_patient(id).await
    }

    /// Reads a patient by DNI.
    pub async fn get_by_dni(&self, dni: i64) -> StorageResult<Patient> {
        self.store.get_patient_by_dni(dni).await
    }

    /// Validates and inserts a new patient.
    pub async fn create(&self, new: NewPatient) -> StorageResult<Patient> {
        new.validate()?;
        self.store.create_patient(new).await
    }

    /// Validates and fully replaces the patient stored under `id`.
    pub async fn replace(&self, id: i64, new: NewPatient) -> StorageResult<Patient> {
        new.validate()?;
        self.store.update_patient(new.into_patient(id)).await
    }

    /// Merges `patch` over the current patient and stores the result.
    pub async fn patch(&self, id: i64, patch: &PatientPatch) -> StorageResult<Patient> {
        patch.validate()?;
        let existing = self.store.get_patient(id).await?;

        if patch.is_empty() {
            debug!(id, "Empty patient patch, returning current state");
            return Ok(existing);
        }

        self.store.update_patient(patch.apply(existing)).await
    }

    /// Deletes a patient.
    pub async fn delete(&self, id: i64) -> StorageResult<()> {
        self.store.delete_patient(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::{ResourceError, StorageError, ValidationError};
    use crate::types::datetime;

    /// Holds a single patient and counts writes.
    struct SinglePatientStore {
        patient: Patient,
        updates: AtomicUsize,
    }

    impl SinglePatientStore {
        fn new() -> Self {
            Self {
                patient: Patient {
                    id: 1,
                    first_name: "Ana".to_string(),
                    last_name: "Lopez".to_string(),
                    address: "Calle 1".to_string(),
                    dni: 30_123_456,
                    discharge_date: datetime::parse("2023-02-01 09:00:00").unwrap(),
                },
                updates: AtomicUsize::new(0),
            }
        }

        fn not_found(id: i64) -> StorageError {
            StorageError::Resource(ResourceError::NotFound {
                resource_type: "patient".to_string(),
                id: id.to_string(),
            })
        }
    }

    #[async_trait]
    impl PatientStore for SinglePatientStore {
        async fn list_patients(
            &self,
            _filter: &PatientFilter,
            _pagination: Pagination,
        ) -> StorageResult<Vec<Patient>> {
            Ok(vec![self.patient.clone()])
        }

        async fn get_patient(&self, id: i64) -> StorageResult<Patient> {
            if id == self.patient.id {
                Ok(self.patient.clone())
            } else {
                Err(Self::not_found(id))
            }
        }

        async fn get_patient_by_dni(&self, dni: i64) -> StorageResult<Patient> {
            if dni == self.patient.dni {
                Ok(self.patient.clone())
            } else {
                Err(Self::not_found(dni))
            }
        }

        async fn create_patient(&self, patient: NewPatient) -> StorageResult<Patient> {
            Ok(patient.into_patient(2))
        }

        async fn update_patient(&self, patient: Patient) -> StorageResult<Patient> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            Ok(patient)
        }

        async fn delete_patient(&self, _id: i64) -> StorageResult<()> {
            Ok(())
        }
    }

    fn service() -> (PatientService<SinglePatientStore>, Arc<SinglePatientStore>) {
        let store = Arc::new(SinglePatientStore::new());
        (PatientService::new(Arc::clone(&store)), store)
    }

    #[tokio::test]
    async fn test_empty_patch_is_a_no_op() {
        let (service, store) = service();

        let patched = service.patch(1, &PatientPatch::default()).await.unwrap();

        assert_eq!(patched, store.patient);
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_patch_on_missing_patient_is_not_found() {
        let (service, _store) = service();
        let err = service.patch(99, &PatientPatch::default()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_patch_writes_merged_entity() {
        let (service, store) = service();
        let patch = PatientPatch {
            address: Some("Calle 2".to_string()),
            ..Default::default()
        };

        let patched = service.patch(1, &patch).await.unwrap();

        assert_eq!(patched.address, "Calle 2");
        assert_eq!(patched.last_name, "Lopez");
        assert_eq!(store.updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_patch_is_rejected_before_reading() {
        let (service, store) = service();
        let patch = PatientPatch {
            dni: Some(5),
            ..Default::default()
        };

        let err = service.patch(99, &patch).await.unwrap_err();

        assert!(matches!(
            err,
            StorageError::Validation(ValidationError::InvalidResource { .. })
        ));
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_validates() {
        let (service, _store) = service();
        let new = NewPatient {
            first_name: "Eva".to_string(),
            last_name: "Diaz".to_string(),
            address: " ".to_string(),
            dni: 40_000_000,
            discharge_date: datetime::parse("2024-01-01 00:00:00").unwrap(),
        };
        assert!(service.create(new).await.is_err());
    }
}
