//! Filter extractor.

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use clinic_persistence::types::FilterCriteria;

use crate::error::RestError;

/// Axum extractor for a resource filter.
///
/// Parses the query string into `F`. Unknown keys (including `limit` and
/// `offset`) are ignored; malformed values are rejected with
/// `400 Bad Request`.
///
/// # Example
///
/// ```rust,ignore
/// use clinic_rest::extractors::FilterQuery;
/// use clinic_persistence::types::PatientFilter;
///
/// async fn list_handler(FilterQuery(filter): FilterQuery<PatientFilter>) {
///     println!("{:?}", filter.last_name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FilterQuery<F>(pub F);

impl<F, S> FromRequestParts<S> for FilterQuery<F>
where
    F: FilterCriteria,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: e.body_text(),
            })?;

        Ok(FilterQuery(F::from_params(&params)?))
    }
}
