//! SQLite backend integration tests.
//!
//! These tests exercise the stores directly against an in-memory database.

use chrono::NaiveDateTime;

use clinic_persistence::backends::sqlite::SqliteBackend;
use clinic_persistence::core::{AppointmentStore, Backend, DentistStore, PatientStore};
use clinic_persistence::error::{ResourceError, StorageError};
use clinic_persistence::query::Pagination;
use clinic_persistence::types::{
    AppointmentFilter, DentistFilter, NewAppointment, NewDentist, NewPatient, PatientFilter,
    datetime,
};

fn create_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

fn at(raw: &str) -> NaiveDateTime {
    datetime::parse(raw).unwrap()
}

fn new_patient(last_name: &str, dni: i64) -> NewPatient {
    NewPatient {
        first_name: "Ana".to_string(),
        last_name: last_name.to_string(),
        address: "Calle Falsa 123".to_string(),
        dni,
        discharge_date: at("2024-01-15 10:30:00"),
    }
}

fn new_dentist(last_name: &str, registration_number: i64) -> NewDentist {
    NewDentist {
        first_name: "Julia".to_string(),
        last_name: last_name.to_string(),
        registration_number,
    }
}

fn new_appointment(patient_id: i64, dentist_id: i64, date: &str) -> NewAppointment {
    NewAppointment {
        patient_id,
        dentist_id,
        date: at(date),
        description: "checkup".to_string(),
    }
}

// ============================================================================
// Create Tests
// ============================================================================

#[tokio::test]
async fn test_create_patient() {
    let backend = create_backend();

    let created = backend
        .create_patient(new_patient("Lopez", 30_123_456))
        .await
        .unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.last_name, "Lopez");

    let read = backend.get_patient(created.id).await.unwrap();
    assert_eq!(read, created);
}

#[tokio::test]
async fn test_create_assigns_increasing_ids() {
    let backend = create_backend();

    let first = backend.create_dentist(new_dentist("Perez", 1)).await.unwrap();
    let second = backend.create_dentist(new_dentist("Gomez", 2)).await.unwrap();

    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_create_duplicate_dni_fails() {
    let backend = create_backend();

    backend
        .create_patient(new_patient("Lopez", 30_123_456))
        .await
        .unwrap();
    let result = backend
        .create_patient(new_patient("Diaz", 30_123_456))
        .await;

    assert!(matches!(
        result,
        Err(StorageError::Resource(ResourceError::AlreadyExists { .. }))
    ));
}

#[tokio::test]
async fn test_create_duplicate_registration_number_fails() {
    let backend = create_backend();

    backend.create_dentist(new_dentist("Perez", 77)).await.unwrap();
    let result = backend.create_dentist(new_dentist("Gomez", 77)).await;

    assert!(matches!(
        result,
        Err(StorageError::Resource(ResourceError::AlreadyExists { .. }))
    ));
}

#[tokio::test]
async fn test_create_oversized_value_fails() {
    let backend = create_backend();

    let result = backend
        .create_patient(new_patient(&"x".repeat(51), 30_123_456))
        .await;

    assert!(matches!(
        result,
        Err(StorageError::Resource(ResourceError::ValueExceeded { .. }))
    ));
}

#[tokio::test]
async fn test_create_appointment_with_unknown_patient_fails() {
    let backend = create_backend();
    let dentist = backend.create_dentist(new_dentist("Perez", 1)).await.unwrap();

    let result = backend
        .create_appointment(new_appointment(99, dentist.id, "2024-06-10 15:00:00"))
        .await;

    assert!(matches!(
        result,
        Err(StorageError::Resource(ResourceError::Conflict { .. }))
    ));
}

// ============================================================================
// Read Tests
// ============================================================================

#[tokio::test]
async fn test_read_nonexistent() {
    let backend = create_backend();

    let result = backend.get_dentist(42).await;

    match result {
        Err(StorageError::Resource(ResourceError::NotFound { resource_type, id })) => {
            assert_eq!(resource_type, "dentist");
            assert_eq!(id, "42");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_read_by_natural_keys() {
    let backend = create_backend();
    let patient = backend
        .create_patient(new_patient("Lopez", 30_123_456))
        .await
        .unwrap();
    let dentist = backend.create_dentist(new_dentist("Perez", 555)).await.unwrap();

    assert_eq!(backend.get_patient_by_dni(30_123_456).await.unwrap(), patient);
    assert_eq!(
        backend.get_dentist_by_registration_number(555).await.unwrap(),
        dentist
    );
    assert!(
        backend
            .get_patient_by_dni(40_000_000)
            .await
            .unwrap_err()
            .is_not_found()
    );
}

// ============================================================================
// Update Tests
// ============================================================================

#[tokio::test]
async fn test_update_overwrites_all_columns() {
    let backend = create_backend();
    let patient = backend
        .create_patient(new_patient("Lopez", 30_123_456))
        .await
        .unwrap();

    let mut changed = patient.clone();
    changed.address = "Avenida 9".to_string();
    changed.discharge_date = at("2025-03-01 08:00:00");
    backend.update_patient(changed.clone()).await.unwrap();

    assert_eq!(backend.get_patient(patient.id).await.unwrap(), changed);
}

#[tokio::test]
async fn test_update_with_unchanged_values_succeeds() {
    let backend = create_backend();
    let dentist = backend.create_dentist(new_dentist("Perez", 1)).await.unwrap();

    let updated = backend.update_dentist(dentist.clone()).await.unwrap();

    assert_eq!(updated, dentist);
}

#[tokio::test]
async fn test_update_nonexistent() {
    let backend = create_backend();
    let dentist = new_dentist("Perez", 1).into_dentist(42);

    let result = backend.update_dentist(dentist).await;

    assert!(result.unwrap_err().is_not_found());
}

// ============================================================================
// Delete Tests
// ============================================================================

#[tokio::test]
async fn test_delete_dentist() {
    let backend = create_backend();
    let dentist = backend.create_dentist(new_dentist("Perez", 1)).await.unwrap();

    backend.delete_dentist(dentist.id).await.unwrap();

    assert!(backend.get_dentist(dentist.id).await.unwrap_err().is_not_found());
    assert!(backend.delete_dentist(dentist.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_referenced_patient_conflicts() {
    let backend = create_backend();
    let patient = backend
        .create_patient(new_patient("Lopez", 30_123_456))
        .await
        .unwrap();
    let dentist = backend.create_dentist(new_dentist("Perez", 1)).await.unwrap();
    backend
        .create_appointment(new_appointment(patient.id, dentist.id, "2024-06-10 15:00:00"))
        .await
        .unwrap();

    let result = backend.delete_patient(patient.id).await;

    assert!(matches!(
        result,
        Err(StorageError::Resource(ResourceError::Conflict { .. }))
    ));
    assert!(backend.get_patient(patient.id).await.is_ok());
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_list_without_filters_returns_everything() {
    let backend = create_backend();
    for (i, name) in ["Perez", "Gomez", "Diaz"].iter().enumerate() {
        backend
            .create_dentist(new_dentist(name, i as i64 + 1))
            .await
            .unwrap();
    }

    let dentists = backend
        .list_dentists(&DentistFilter::default(), Pagination::default())
        .await
        .unwrap();

    assert_eq!(dentists.len(), 3);
    assert_eq!(dentists[0].last_name, "Perez");
}

#[tokio::test]
async fn test_list_with_text_filter() {
    let backend = create_backend();
    backend
        .create_patient(new_patient("Lopez", 30_000_001))
        .await
        .unwrap();
    backend
        .create_patient(new_patient("Diaz", 30_000_002))
        .await
        .unwrap();

    let filter = PatientFilter {
        last_name: Some("Diaz".to_string()),
        ..Default::default()
    };
    let patients = backend
        .list_patients(&filter, Pagination::default())
        .await
        .unwrap();

    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].dni, 30_000_002);
}

#[tokio::test]
async fn test_list_filter_values_are_bound_not_spliced() {
    let backend = create_backend();
    backend
        .create_patient(new_patient("O'Brien", 30_000_001))
        .await
        .unwrap();
    backend
        .create_patient(new_patient("Diaz", 30_000_002))
        .await
        .unwrap();

    let injection = PatientFilter {
        last_name: Some("x' OR '1'='1".to_string()),
        ..Default::default()
    };
    let matched = backend
        .list_patients(&injection, Pagination::default())
        .await
        .unwrap();
    assert!(matched.is_empty());

    let quoted = PatientFilter {
        last_name: Some("O'Brien".to_string()),
        ..Default::default()
    };
    let matched = backend
        .list_patients(&quoted, Pagination::default())
        .await
        .unwrap();
    assert_eq!(matched.len(), 1);
}

#[tokio::test]
async fn test_list_pagination_window() {
    let backend = create_backend();
    for n in 1..=5 {
        backend
            .create_dentist(new_dentist(&format!("Dentist {n}"), n))
            .await
            .unwrap();
    }

    let page = backend
        .list_dentists(&DentistFilter::default(), Pagination::new(2, 2))
        .await
        .unwrap();
    let ids: Vec<i64> = page.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![3, 4]);

    let past_end = backend
        .list_dentists(&DentistFilter::default(), Pagination::new(2, 10))
        .await
        .unwrap();
    assert!(past_end.is_empty());
}

// ============================================================================
// Appointment Filter Tests
// ============================================================================

/// Two patients, two dentists, four appointments across the year.
async fn seed_appointments(backend: &SqliteBackend) -> (i64, i64, i64, i64) {
    let ana = backend
        .create_patient(new_patient("Lopez", 30_000_001))
        .await
        .unwrap();
    let eva = backend
        .create_patient(new_patient("Diaz", 30_000_002))
        .await
        .unwrap();
    let perez = backend.create_dentist(new_dentist("Perez", 1)).await.unwrap();
    let gomez = backend.create_dentist(new_dentist("Gomez", 2)).await.unwrap();

    for (patient, dentist, date) in [
        (ana.id, perez.id, "2024-01-10 09:00:00"),
        (ana.id, gomez.id, "2024-03-05 11:30:00"),
        (eva.id, perez.id, "2024-06-20 16:00:00"),
        (eva.id, perez.id, "2024-12-31 23:59:59"),
    ] {
        backend
            .create_appointment(new_appointment(patient, dentist, date))
            .await
            .unwrap();
    }

    (ana.id, eva.id, perez.id, gomez.id)
}

#[tokio::test]
async fn test_filter_by_dentist_and_from_date() {
    let backend = create_backend();
    let (_, eva, perez, _) = seed_appointments(&backend).await;

    let filter = AppointmentFilter {
        dentist_id: Some(perez),
        from_date: Some(at("2024-02-01 00:00:00")),
        ..Default::default()
    };
    let appointments = backend
        .list_appointments(&filter, Pagination::default())
        .await
        .unwrap();

    assert_eq!(appointments.len(), 2);
    assert!(appointments.iter().all(|a| a.patient_id == eva));
}

#[tokio::test]
async fn test_filter_date_bounds_are_inclusive() {
    let backend = create_backend();
    seed_appointments(&backend).await;

    let filter = AppointmentFilter {
        from_date: Some(at("2024-01-10 09:00:00")),
        to_date: Some(at("2024-12-31 23:59:59")),
        ..Default::default()
    };
    let appointments = backend
        .list_appointments(&filter, Pagination::default())
        .await
        .unwrap();

    assert_eq!(appointments.len(), 4);
}

#[tokio::test]
async fn test_filter_by_patient_dni() {
    let backend = create_backend();
    let (ana, _, _, _) = seed_appointments(&backend).await;

    let filter = AppointmentFilter {
        dni: Some(30_000_001),
        ..Default::default()
    };
    let appointments = backend
        .list_appointments(&filter, Pagination::default())
        .await
        .unwrap();

    assert_eq!(appointments.len(), 2);
    assert!(appointments.iter().all(|a| a.patient_id == ana));
}

#[tokio::test]
async fn test_filter_matching_nothing() {
    let backend = create_backend();
    let (_, _, _, gomez) = seed_appointments(&backend).await;

    let filter = AppointmentFilter {
        dentist_id: Some(gomez),
        to_date: Some(at("2024-01-31 00:00:00")),
        ..Default::default()
    };
    let appointments = backend
        .list_appointments(&filter, Pagination::default())
        .await
        .unwrap();

    assert!(appointments.is_empty());
}

// ============================================================================
// File Database Tests
// ============================================================================

#[tokio::test]
async fn test_file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clinic.db");

    {
        let backend = SqliteBackend::open(&path).unwrap();
        backend.init_schema().unwrap();
        assert!(!backend.is_memory());
        backend
            .create_patient(new_patient("Lopez", 30_123_456))
            .await
            .unwrap();
    }

    let backend = SqliteBackend::open(&path).unwrap();
    backend.init_schema().unwrap();
    let patient = backend.get_patient_by_dni(30_123_456).await.unwrap();
    assert_eq!(patient.last_name, "Lopez");
    assert!(backend.health_check().await.is_ok());
}
