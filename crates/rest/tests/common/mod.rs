//! Common test utilities for clinic API testing.
//!
//! Builds a [`TestServer`] over an in-memory SQLite backend and seeds
//! resources through the storage traits.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use clinic_persistence::backends::sqlite::SqliteBackend;
use clinic_persistence::core::{AppointmentStore, DentistStore, PatientStore};
use clinic_persistence::types::{
    Appointment, Dentist, NewAppointment, NewDentist, NewPatient, Patient, datetime,
};
use clinic_rest::{AppState, ServerConfig};

/// Header carrying the API token.
pub const TOKEN: HeaderName = HeaderName::from_static("token");

/// The token configured by [`ServerConfig::for_testing`].
pub fn valid_token() -> HeaderValue {
    HeaderValue::from_static("test-token")
}

/// Creates a test server with the default test configuration.
pub async fn create_test_server() -> (TestServer, Arc<SqliteBackend>) {
    create_test_server_with_config(ServerConfig::for_testing()).await
}

/// Creates a test server with a custom configuration.
pub async fn create_test_server_with_config(
    config: ServerConfig,
) -> (TestServer, Arc<SqliteBackend>) {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    let backend = Arc::new(backend);

    let state = AppState::new(Arc::clone(&backend), config);
    let app = clinic_rest::routing::create_routes(state);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, backend)
}

/// Seeds a patient.
pub async fn seed_patient(backend: &SqliteBackend, last_name: &str, dni: i64) -> Patient {
    backend
        .create_patient(NewPatient {
            first_name: "Ana".to_string(),
            last_name: last_name.to_string(),
            address: "Calle Falsa 123".to_string(),
            dni,
            discharge_date: datetime::parse("2023-02-01 09:00:00").expect("valid date"),
        })
        .await
        .expect("Failed to seed patient")
}

/// Seeds a dentist.
pub async fn seed_dentist(
    backend: &SqliteBackend,
    last_name: &str,
    registration_number: i64,
) -> Dentist {
    backend
        .create_dentist(NewDentist {
            first_name: "Luis".to_string(),
            last_name: last_name.to_string(),
            registration_number,
        })
        .await
        .expect("Failed to seed dentist")
}

/// Seeds an appointment.
pub async fn seed_appointment(
    backend: &SqliteBackend,
    patient_id: i64,
    dentist_id: i64,
    date: &str,
) -> Appointment {
    backend
        .create_appointment(NewAppointment {
            patient_id,
            dentist_id,
            date: datetime::parse(date).expect("valid date"),
            description: "checkup".to_string(),
        })
        .await
        .expect("Failed to seed appointment")
}
