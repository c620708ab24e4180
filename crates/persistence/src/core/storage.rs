//! Per-resource storage traits.
//!
//! Each trait is a thin CRUD contract over one table. Listing takes a typed
//! filter plus pagination; implementations turn the filter into a
//! [`QueryBuilder`](crate::query::QueryBuilder) and execute the
//! parameterized form.
//!
//! # Errors
//!
//! Implementations translate driver failures into the domain taxonomy:
//!
//! * `ResourceError::NotFound` - no row with the given key, or an update /
//!   delete affected zero rows
//! * `ResourceError::AlreadyExists` - a unique key is already taken
//! * `ResourceError::Conflict` - a foreign key rejected the write
//! * `ResourceError::ValueExceeded` - a value does not fit its column
//! * `BackendError` - anything else

use async_trait::async_trait;

use crate::core::Backend;
use crate::error::StorageResult;
use crate::query::Pagination;
use crate::types::{
    Appointment, AppointmentFilter, Dentist, DentistFilter, NewAppointment, NewDentist,
    NewPatient, Patient, PatientFilter,
};

/// Storage for patients.
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Lists patients matching `filter`, ordered by id.
    async fn list_patients(
        &self,
        filter: &PatientFilter,
        pagination: Pagination,
    ) -> StorageResult<Vec<Patient>>;

    /// Reads a patient by id.
    async fn get_patient(&self, id: i64) -> StorageResult<Patient>;

    /// Reads a patient by DNI.
    async fn get_patient_by_dni(&self, dni: i64) -> StorageResult<Patient>;

    /// Inserts a patient and returns it with its assigned id.
    async fn create_patient(&self, patient: NewPatient) -> StorageResult<Patient>;

    /// Overwrites every column of an existing patient.
    async fn update_patient(&self, patient: Patient) -> StorageResult<Patient>;

    /// Deletes a patient.
    async fn delete_patient(&self, id: i64) -> StorageResult<()>;
}

/// Storage for dentists.
#[async_trait]
pub trait DentistStore: Send + Sync {
    /// Lists dentists matching `filter`, ordered by id.
    async fn list_dentists(
        &self,
        filter: &DentistFilter,
        pagination: Pagination,
    ) -> StorageResult<Vec<Dentist>>;

    /// Reads a dentist by id.
    async fn get_dentist(&self, id: i64) -> StorageResult<Dentist>;

    /// Reads a dentist by registration number.
    async fn get_dentist_by_registration_number(
        &self,
        registration_number: i64,
    ) -> StorageResult<Dentist>;

    /// Inserts a dentist and returns it with its assigned id.
    async fn create_dentist(&self, dentist: NewDentist) -> StorageResult<Dentist>;

    /// Overwrites every column of an existing dentist.
    async fn update_dentist(&self, dentist: Dentist) -> StorageResult<Dentist>;

    /// Deletes a dentist.
    async fn delete_dentist(&self, id: i64) -> StorageResult<()>;
}

/// Storage for appointments.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Lists appointments matching `filter`, ordered by id.
    async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
        pagination: Pagination,
    ) -> StorageResult<Vec<Appointment>>;

    /// Reads an appointment by id.
    async fn get_appointment(&self, id: i64) -> StorageResult<Appointment>;

    /// Inserts an appointment and returns it with its assigned id.
    async fn create_appointment(&self, appointment: NewAppointment) -> StorageResult<Appointment>;

    /// Overwrites every column of an existing appointment.
    async fn update_appointment(&self, appointment: Appointment) -> StorageResult<Appointment>;

    /// Deletes an appointment.
    async fn delete_appointment(&self, id: i64) -> StorageResult<()>;
}

/// A backend that stores every clinic resource.
pub trait ClinicStorage: Backend + PatientStore + DentistStore + AppointmentStore {}

impl<T> ClinicStorage for T where T: Backend + PatientStore + DentistStore + AppointmentStore {}
