//! Service-level tests against an in-memory SQLite backend.

use std::sync::Arc;

use clinic_persistence::backends::sqlite::SqliteBackend;
use clinic_persistence::error::{StorageError, ValidationError};
use clinic_persistence::query::Pagination;
use clinic_persistence::services::{AppointmentService, DentistService, PatientService};
use clinic_persistence::types::{
    AppointmentFilter, AppointmentPatch, DentistPatch, NewAppointmentByDni, NewDentist,
    NewPatient, PatientPatch, datetime,
};

fn create_backend() -> Arc<SqliteBackend> {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    Arc::new(backend)
}

fn new_patient(dni: i64) -> NewPatient {
    NewPatient {
        first_name: "Ana".to_string(),
        last_name: "Lopez".to_string(),
        address: "Calle Falsa 123".to_string(),
        dni,
        discharge_date: datetime::parse("2024-01-15 10:30:00").unwrap(),
    }
}

fn new_dentist(registration_number: i64) -> NewDentist {
    NewDentist {
        first_name: "Julia".to_string(),
        last_name: "Perez".to_string(),
        registration_number,
    }
}

fn by_dni(patient_dni: i64, dentist_number: i64) -> NewAppointmentByDni {
    NewAppointmentByDni {
        patient_dni,
        dentist_number,
        date: datetime::parse("2024-06-10 15:00:00").unwrap(),
        description: "cleaning".to_string(),
    }
}

// ============================================================================
// Patch Tests
// ============================================================================

#[tokio::test]
async fn test_patch_updates_only_present_fields() {
    let backend = create_backend();
    let patients = PatientService::new(backend);
    let patient = patients.create(new_patient(30_123_456)).await.unwrap();

    let patch = PatientPatch {
        first_name: Some("Eva".to_string()),
        ..Default::default()
    };
    let patched = patients.patch(patient.id, &patch).await.unwrap();

    assert_eq!(patched.first_name, "Eva");
    assert_eq!(patched.last_name, patient.last_name);
    assert_eq!(patched.dni, patient.dni);
    assert_eq!(patients.get(patient.id).await.unwrap(), patched);
}

#[tokio::test]
async fn test_patch_applied_twice_is_stable() {
    let backend = create_backend();
    let dentists = DentistService::new(backend);
    let dentist = dentists.create(new_dentist(10)).await.unwrap();

    let patch = DentistPatch {
        registration_number: Some(11),
        ..Default::default()
    };
    let once = dentists.patch(dentist.id, &patch).await.unwrap();
    let twice = dentists.patch(dentist.id, &patch).await.unwrap();

    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_empty_patch_returns_current_state() {
    let backend = create_backend();
    let patients = PatientService::new(backend);
    let patient = patients.create(new_patient(30_123_456)).await.unwrap();

    let patched = patients
        .patch(patient.id, &PatientPatch::default())
        .await
        .unwrap();

    assert_eq!(patched, patient);
}

#[tokio::test]
async fn test_patch_missing_entity_is_not_found() {
    let backend = create_backend();
    let appointments = AppointmentService::new(backend);

    let patch = AppointmentPatch {
        description: Some("x".to_string()),
        ..Default::default()
    };
    let err = appointments.patch(7, &patch).await.unwrap_err();

    assert!(err.is_not_found());
}

// ============================================================================
// Replace Tests
// ============================================================================

#[tokio::test]
async fn test_replace_keeps_id() {
    let backend = create_backend();
    let dentists = DentistService::new(backend);
    let dentist = dentists.create(new_dentist(10)).await.unwrap();

    let replaced = dentists
        .replace(
            dentist.id,
            NewDentist {
                first_name: "Marta".to_string(),
                last_name: "Ruiz".to_string(),
                registration_number: 20,
            },
        )
        .await
        .unwrap();

    assert_eq!(replaced.id, dentist.id);
    assert_eq!(replaced.registration_number, 20);
}

#[tokio::test]
async fn test_replace_rejects_invalid_payload() {
    let backend = create_backend();
    let patients = PatientService::new(backend);
    let patient = patients.create(new_patient(30_123_456)).await.unwrap();

    let err = patients
        .replace(patient.id, new_patient(1234))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StorageError::Validation(ValidationError::InvalidResource { .. })
    ));
}

// ============================================================================
// Booking By Natural Keys
// ============================================================================

#[tokio::test]
async fn test_create_by_dni_resolves_references() {
    let backend = create_backend();
    let patient = PatientService::new(backend.clone())
        .create(new_patient(30_123_456))
        .await
        .unwrap();
    let dentist = DentistService::new(backend.clone())
        .create(new_dentist(555))
        .await
        .unwrap();
    let appointments = AppointmentService::new(backend);

    let created = appointments
        .create_by_dni(by_dni(30_123_456, 555))
        .await
        .unwrap();

    assert_eq!(created.patient_id, patient.id);
    assert_eq!(created.dentist_id, dentist.id);
    assert_eq!(created.description, "cleaning");

    let listed = appointments
        .list(
            &AppointmentFilter {
                dni: Some(30_123_456),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn test_create_by_dni_unknown_patient() {
    let backend = create_backend();
    DentistService::new(backend.clone())
        .create(new_dentist(555))
        .await
        .unwrap();
    let appointments = AppointmentService::new(backend);

    let err = appointments
        .create_by_dni(by_dni(30_123_456, 555))
        .await
        .unwrap_err();

    match err {
        StorageError::Validation(ValidationError::UnresolvedReference {
            resource_type,
            field,
            value,
        }) => {
            assert_eq!(resource_type, "patient");
            assert_eq!(field, "dni");
            assert_eq!(value, "30123456");
        }
        other => panic!("expected UnresolvedReference, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_by_dni_unknown_dentist() {
    let backend = create_backend();
    PatientService::new(backend.clone())
        .create(new_patient(30_123_456))
        .await
        .unwrap();
    let appointments = AppointmentService::new(backend);

    let err = appointments
        .create_by_dni(by_dni(30_123_456, 999))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StorageError::Validation(ValidationError::UnresolvedReference { ref resource_type, .. })
            if resource_type == "dentist"
    ));
}
