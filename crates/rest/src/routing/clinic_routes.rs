//! Clinic route configuration.
//!
//! Reads are public. Every write goes through [`require_token`].

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use clinic_persistence::core::ClinicStorage;

use crate::handlers::{self, appointment, dentist, patient};
use crate::middleware::require_token;
use crate::state::AppState;

/// Creates all clinic API routes.
///
/// # Routes
///
/// ## Operational
/// - `GET /ping` - Liveness ping, answers `"pong"`
/// - `GET /health` - Health check
/// - `GET /_liveness`, `GET /_readiness` - Probes
///
/// ## Resources (`{resource}` is `patient`, `dentist` or `appointment`)
/// - `GET /v1/{resource}` - List with filters and `limit`/`offset`
/// - `GET /v1/{resource}/{id}` - Read
/// - `POST /v1/{resource}` - Create (token)
/// - `PUT /v1/{resource}/{id}` - Replace (token)
/// - `PATCH /v1/{resource}/{id}` - Partial update (token)
/// - `DELETE /v1/{resource}/{id}` - Delete (token)
/// - `POST /v1/appointment/dni` - Book by patient DNI and dentist number (token)
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: ClinicStorage + 'static,
{
    let public = Router::new()
        .route("/ping", get(handlers::ping_handler))
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        .route("/v1/patient", get(patient::list_patients_handler::<S>))
        .route("/v1/patient/{id}", get(patient::get_patient_handler::<S>))
        .route("/v1/dentist", get(dentist::list_dentists_handler::<S>))
        .route("/v1/dentist/{id}", get(dentist::get_dentist_handler::<S>))
        .route(
            "/v1/appointment",
            get(appointment::list_appointments_handler::<S>),
        )
        .route(
            "/v1/appointment/{id}",
            get(appointment::get_appointment_handler::<S>),
        );

    let protected = Router::new()
        // Patients
        .route("/v1/patient", post(patient::create_patient_handler::<S>))
        .route(
            "/v1/patient/{id}",
            put(patient::replace_patient_handler::<S>)
                .patch(patient::patch_patient_handler::<S>)
                .delete(patient::delete_patient_handler::<S>),
        )
        // Dentists
        .route("/v1/dentist", post(dentist::create_dentist_handler::<S>))
        .route(
            "/v1/dentist/{id}",
            put(dentist::replace_dentist_handler::<S>)
                .patch(dentist::patch_dentist_handler::<S>)
                .delete(dentist::delete_dentist_handler::<S>),
        )
        // Appointments
        .route(
            "/v1/appointment",
            post(appointment::create_appointment_handler::<S>),
        )
        .route(
            "/v1/appointment/dni",
            post(appointment::create_appointment_by_dni_handler::<S>),
        )
        .route(
            "/v1/appointment/{id}",
            put(appointment::replace_appointment_handler::<S>)
                .patch(appointment::patch_appointment_handler::<S>)
                .delete(appointment::delete_appointment_handler::<S>),
        )
        .route_layer(from_fn_with_state(state.clone(), require_token::<S>));

    public.merge(protected).with_state(state)
}
