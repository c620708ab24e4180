//! Appointment service.

use std::sync::Arc;

use tracing::{debug, info};

use crate::core::{AppointmentStore, DentistStore, PatientStore};
use crate::error::{StorageError, StorageResult, ValidationError};
use crate::query::Pagination;
use crate::types::{
    Appointment, AppointmentFilter, AppointmentPatch, NewAppointment, NewAppointmentByDni, Patch,
};

/// Business operations on appointments.
///
/// Needs patient and dentist lookups as well, for booking by natural keys.
pub struct AppointmentService<S> {
    store: Arc<S>,
}

impl<S> Clone for AppointmentService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> AppointmentService<S>
where
    S: AppointmentStore + PatientStore + DentistStore,
{
    /// Creates a service over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lists appointments matching `filter`.
    pub async fn list(
        &self,
        filter: &AppointmentFilter,
        pagination: Pagination,
    ) -> StorageResult<Vec<Appointment>> {
        self.store.list_appointments(filter, pagination).await
    }

    /// Reads an appointment by id.
    pub async fn get(&self, id: i64) -> StorageResult<Appointment> {
        self.store.get_appointment(id).await
    }

    /// Validates and inserts a new appointment.
    pub async fn create(&self, new: NewAppointment) -> StorageResult<Appointment> {
        new.validate()?;
        self.store.create_appointment(new).await
    }

    /// Books an appointment from a patient DNI and a dentist registration
    /// number.
    ///
    /// An unknown DNI or registration number is a validation failure of the
    /// payload, not a missing appointment.
    pub async fn create_by_dni(&self, new: NewAppointmentByDni) -> StorageResult<Appointment> {
        new.validate()?;

        let patient = self
            .store
            .get_patient_by_dni(new.patient_dni)
            .await
            .map_err(|e| unresolved(e, "patient", "dni", new.patient_dni))?;
        let dentist = self
            .store
            .get_dentist_by_registration_number(new.dentist_number)
            .await
            .map_err(|e| unresolved(e, "dentist", "registration_number", new.dentist_number))?;

        info!(
            patient_id = patient.id,
            dentist_id = dentist.id,
            "Resolved appointment references"
        );
        self.store
            .create_appointment(new.resolve(patient.id, dentist.id))
            .await
    }

    /// Validates and fully replaces the appointment stored under `id`.
    pub async fn replace(&self, id: i64, new: NewAppointment) -> StorageResult<Appointment> {
        new.validate()?;
        self.store
            .update_appointment(new.into_appointment(id))
            .await
    }

    /// Merges `patch` over the current appointment and stores the result.
    pub async fn patch(&self, id: i64, patch: &AppointmentPatch) -> StorageResult<Appointment> {
        patch.validate()?;
        let existing = self.store.get_appointment(id).await?;

        if patch.is_empty() {
            debug!(id, "Empty appointment patch, returning current state");
            return Ok(existing);
        }

        self.store.update_appointment(patch.apply(existing)).await
    }

    /// Deletes an appointment.
    pub async fn delete(&self, id: i64) -> StorageResult<()> {
        self.store.delete_appointment(id).await
    }
}

fn unresolved(err: StorageError, resource_type: &str, field: &str, value: i64) -> StorageError {
    if err.is_not_found() {
        ValidationError::UnresolvedReference {
            resource_type: resource_type.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
        .into()
    } else {
        err
    }
}
