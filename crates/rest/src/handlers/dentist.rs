//! Dentist handlers.
//!
//! `[base]/v1/dentist` and `[base]/v1/dentist/{id}`

use axum::{extract::State, response::Response};
use clinic_persistence::core::DentistStore;
use clinic_persistence::types::{DentistFilter, DentistPatch, NewDentist};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{FilterQuery, JsonBody, PageQuery, ResourceId};
use crate::responses;
use crate::state::AppState;

/// Handler for listing dentists.
///
/// # HTTP Request
///
/// `GET [base]/v1/dentist?first_name=&last_name=&registration_number=&limit=&offset=`
pub async fn list_dentists_handler<S>(
    State(state): State<AppState<S>>,
    FilterQuery(filter): FilterQuery<DentistFilter>,
    PageQuery(pagination): PageQuery,
) -> RestResult<Response>
where
    S: DentistStore + 'static,
{
    debug!(?filter, limit = pagination.limit, offset = pagination.offset, "Processing dentist list request");

    let dentists = state.dentists().list(&filter, pagination).await?;
    Ok(responses::ok(dentists))
}

/// Handler for reading a dentist.
///
/// # HTTP Request
///
/// `GET [base]/v1/dentist/{id}`
pub async fn get_dentist_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
) -> RestResult<Response>
where
    S: DentistStore + 'static,
{
    debug!(id, "Processing dentist read request");

    let dentist = state.dentists().get(id).await?;
    Ok(responses::ok(dentist))
}

/// Handler for registering a dentist.
///
/// # HTTP Request
///
/// `POST [base]/v1/dentist`
///
/// # Response
///
/// - `201 Created` - The stored dentist, with `Location`
/// - `409 Conflict` - Registration number already taken
/// - `422 Unprocessable Entity` - Invalid payload
pub async fn create_dentist_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(new): JsonBody<NewDentist>,
) -> RestResult<Response>
where
    S: DentistStore + 'static,
{
    debug!(
        registration_number = new.registration_number,
        "Processing dentist create request"
    );

    let dentist = state.dentists().create(new).await?;
    Ok(responses::created(
        &format!("/v1/dentist/{}", dentist.id),
        dentist,
    ))
}

/// Handler for fully replacing a dentist.
///
/// # HTTP Request
///
/// `PUT [base]/v1/dentist/{id}`
pub async fn replace_dentist_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
    JsonBody(new): JsonBody<NewDentist>,
) -> RestResult<Response>
where
    S: DentistStore + 'static,
{
    debug!(id, "Processing dentist replace request");

    let dentist = state.dentists().replace(id, new).await?;
    Ok(responses::ok(dentist))
}

/// Handler for partially updating a dentist.
///
/// # HTTP Request
///
/// `PATCH [base]/v1/dentist/{id}`
pub async fn patch_dentist_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
    JsonBody(patch): JsonBody<DentistPatch>,
) -> RestResult<Response>
where
    S: DentistStore + 'static,
{
    debug!(id, "Processing dentist patch request");

    let dentist = state.dentists().patch(id, &patch).await?;
    Ok(responses::ok(dentist))
}

/// Handler for deleting a dentist.
///
/// # HTTP Request
///
/// `DELETE [base]/v1/dentist/{id}`
///
/// # Response
///
/// - `204 No Content` - Deleted
/// - `404 Not Found` - No such dentist
/// - `409 Conflict` - The dentist still has appointments
pub async fn delete_dentist_handler<S>(
    State(state): State<AppState<S>>,
    ResourceId(id): ResourceId,
) -> RestResult<Response>
where
    S: DentistStore + 'static,
{
    debug!(id, "Processing dentist delete request");

    state.dentists().delete(id).await?;
    Ok(responses::no_content())
}
