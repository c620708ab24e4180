//! Appointment handlers.
//!
//! `[base]/v1/appointment`, `[base]/v1/appointment/{id}` and
//! `[base]/v1/appointment/dni`

use axum::{extract::State, response::Response};
use clinic_persistence::core::{AppointmentStore, DentistStore, PatientStore};
use clinic_persistence::types::{
    AppointmentFilter, AppointmentPatch, NewAppointment, NewAppointmentByDni,
};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{FilterQuery, JsonBody, PageQuery, ResourceId};
use crate::responses;
use crate::state::AppState;

/// Handler for listing appointments.
///
/// `dni` matches the patient's DNI; `from_date` and `to_date` are inclusive
/// bounds formatted `YYYY-MM-DD HH:MM:SS`.
///
/// # HTTP Request
///
/// `GET [base]/v1/appointment?patient_id=&dentist_id=&dni=&from_date=&to_date=&limit=&offset=`
///
/// # Response
///
/// - `200 OK` - Matching appointments, ordered by id
/// - `400 Bad Request` - Malformed filter or pagination value
pub async fn list_appointments_handler<S>(
    State(state): State<AppState<S>>,
    FilterQuery(filter): FilterQuery<AppointmentFilter>,
    PageQuery(pagination): PageQuery,
) -> RestResult<Response>
where
    S: AppointmentStore + PatientStore + DentistStore + 'static,
{
    debug!(?filter, limit = pagination.limit, offset = pagination.offset, "Processing appointment list request");

    let appointments = state.appointments().list(&filter, pagination).await?;
    Ok(responses::ok(appointments))
}

/// Handler for reading an appointment.
///
/// # HTTP Request
///
/// `GET [base]/v1/appointment/{id}`
pub async fn get_appointment_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
) -> RestResult<Response>
where
    S: AppointmentStore + PatientStore + DentistStore + 'static,
{
    debug!(id, "Processing appointment read request");

    let appointment = state.appointments().get(id).await?;
    Ok(responses::ok(appointment))
}

/// Handler for booking an appointment by ids.
///
/// # HTTP Request
///
/// `POST [base]/v1/appointment`
///
/// # Response
///
/// - `201 Created` - The stored appointment, with `Location`
/// - `409 Conflict` - The patient or dentist does not exist
/// - `422 Unprocessable Entity` - Invalid payload
pub async fn create_appointment_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(new): JsonBody<NewAppointment>,
) -> RestResult<Response>
where
    S: AppointmentStore + PatientStore + DentistStore + 'static,
{
    debug!(
        patient_id = new.patient_id,
        dentist_id = new.dentist_id,
        "Processing appointment create request"
    );

    let appointment = state.appointments().create(new).await?;
    Ok(created(appointment))
}

/// Handler for booking an appointment by patient DNI and dentist
/// registration number.
///
/// # HTTP Request
///
/// `POST [base]/v1/appointment/dni`
///
/// ```json
/// {
///   "patient_dni": 30123456,
///   "dentist_number": 1201,
///   "date": "2024-06-10 15:00:00",
///   "description": "checkup"
/// }
/// ```
///
/// # Response
///
/// - `201 Created` - The stored appointment, with `Location`
/// - `422 Unprocessable Entity` - Invalid payload, or no patient/dentist
///   matches the given numbers
pub async fn create_appointment_by_dni_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(new): JsonBody<NewAppointmentByDni>,
) -> RestResult<Response>
where
    S: AppointmentStore + PatientStore + DentistStore + 'static,
{
    debug!(
        patient_dni = new.patient_dni,
        dentist_number = new.dentist_number,
        "Processing appointment create-by-dni request"
    );

    let appointment = state.appointments().create_by_dni(new).await?;
    Ok(created(appointment))
}

/// Handler for fully replacing an appointment.
///
/// # HTTP Request
///
/// `PUT [base]/v1/appointment/{id}`
pub async fn replace_appointment_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
    JsonBody(new): JsonBody<NewAppointment>,
) -> RestResult<Response>
where
    S: AppointmentStore + PatientStore + DentistStore + 'static,
{
    debug!(id, "Processing appointment replace request");

    let appointment = state.appointments().replace(id, new).await?;
    Ok(responses::ok(appointment))
}

/// Handler for partially updating an appointment.
///
/// # HTTP Request
///
/// `PATCH [base]/v1/appointment/{id}`
pub async fn patch_appointment_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
    JsonBody(patch): JsonBody<AppointmentPatch>,
) -> RestResult<Response>
where
    S: AppointmentStore + PatientStore + DentistStore + 'static,
{
    debug!(id, "Processing appointment patch request");

    let appointment = state.appointments().patch(id, &patch).await?;
    Ok(responses::ok(appointment))
}

/// Handler for cancelling an appointment.
///
/// # HTTP Request
///
/// `DELETE [base]/v1/appointment/{id}`
pub async fn delete_appointment_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
) -> RestResult<Response>
where
    S: AppointmentStore + PatientStore + DentistStore + 'static,
{
    debug!(id, "Processing appointment delete request");

    state.appointments().delete(id).await?;
    Ok(responses::no_content())
}

fn created(appointment: clinic_persistence::types::Appointment) -> Response {
    responses::created(
        &format!("/v1/appointment/{}", appointment.id),
        appointment,
    )
}
