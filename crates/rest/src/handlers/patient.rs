//! Patient handlers.
//!
//! `[base]/v1/patient` and `[base]/v1/patient/{id}`

use axum::{extract::State, response::Response};
use clinic_persistence::core::PatientStore;
use clinic_persistence::types::{NewPatient, PatientFilter, PatientPatch};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{FilterQuery, JsonBody, PageQuery, ResourceId};
use crate::responses;
use crate::state::AppState;

/// Handler for listing patients.
///
/// # HTTP Request
///
/// `GET [base]/v1/patient?first_name=&last_name=&dni=&limit=&offset=`
///
/// # Response
///
/// - `200 OK` - Matching patients, ordered by id
/// - `400 Bad Request` - Malformed filter or pagination value
pub async fn list_patients_handler<S>(
    State(state): State<AppState<S>>,
    FilterQuery(filter): FilterQuery<PatientFilter>,
    PageQuery(pagination): PageQuery,
) -> RestResult<Response>
where
    S: PatientStore + 'static,
{
    debug!(?filter, limit = pagination.limit, offset = pagination.offset, "Processing patient list request");

    let patients = state.patients().list(&filter, pagination).await?;
    Ok(responses::ok(patients))
}

/// Handler for reading a patient.
///
/// # HTTP Request
///
/// `GET [base]/v1/patient/{id}`
///
/// # Response
///
/// - `200 OK` - The patient
/// - `400 Bad Request` - Non-numeric id
/// - `404 Not Found` - No such patient
pub async fn get_patient_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
) -> RestResult<Response>
where
    S: PatientStore + 'static,
{
    debug!(id, "Processing patient read request");

    let patient = state.patients().get(id).await?;
    Ok(responses::ok(patient))
}

/// Handler for registering a patient.
///
/// # HTTP Request
///
/// `POST [base]/v1/patient`
///
/// # Response
///
/// - `201 Created` - The stored patient, with `Location`
/// - `409 Conflict` - DNI already registered
/// - `422 Unprocessable Entity` - Invalid payload
pub async fn create_patient_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(new): JsonBody<NewPatient>,
) -> RestResult<Response>
where
    S: PatientStore + 'static,
{
    debug!(dni = new.dni, "Processing patient create request");

    let patient = state.patients().create(new).await?;
    Ok(responses::created(
        &format!("/v1/patient/{}", patient.id),
        patient,
    ))
}

/// Handler for fully replacing a patient.
///
/// # HTTP Request
///
/// `PUT [base]/v1/patient/{id}`
///
/// # Response
///
/// - `200 OK` - The stored patient
/// - `404 Not Found` - No such patient
/// - `409 Conflict` - DNI already registered
/// - `422 Unprocessable Entity` - Invalid payload
pub async fn replace_patient_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
    JsonBody(new): JsonBody<NewPatient>,
) -> RestResult<Response>
where
    S: PatientStore + 'static,
{
    debug!(id, "Processing patient replace request");

    let patient = state.patients().replace(id, new).await?;
    Ok(responses::ok(patient))
}

/// Handler for partially updating a patient.
///
/// Only the fields present in the body are changed; an empty body leaves the
/// patient untouched.
///
/// # HTTP Request
///
/// `PATCH [base]/v1/patient/{id}`
///
/// # Response
///
/// - `200 OK` - The patient after the update
/// - `404 Not Found` - No such patient
/// - `422 Unprocessable Entity` - Invalid payload
pub async fn patch_patient_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
    JsonBody(patch): JsonBody<PatientPatch>,
) -> RestResult<Response>
where
    S: PatientStore + 'static,
{
    debug!(id, "Processing patient patch request");

    let patient = state.patients().patch(id, &patch).await?;
    Ok(responses::ok(patient))
}

/// Handler for deleting a patient.
///
/// # HTTP Request
///
/// `DELETE [base]/v1/patient/{id}`
///
/// # Response
///
/// - `204 No Content` - Deleted
/// - `404 Not Found` - No such patient
/// - `409 Conflict` - The patient still has appointments
pub async fn delete_patient_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
) -> RestResult<Response>
where
    S: PatientStore + 'static,
{
    debug!(id, "Processing patient delete request");

    state.patients().delete(id).await?;
    Ok(responses::no_content())
}
