//! JSON body extractor.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::RestError;

/// Axum extractor for JSON payloads.
///
/// Works like [`axum::Json`], but an unreadable or mistyped body is reported
/// as `422 Unprocessable Entity` in the API's error envelope.
///
/// # Example
///
/// ```rust,ignore
/// use clinic_rest::extractors::JsonBody;
/// use clinic_persistence::types::NewDentist;
///
/// async fn create_handler(JsonBody(dentist): JsonBody<NewDentist>) {
///     println!("Registering {}", dentist.last_name);
/// }
/// ```
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                debug!(error = %rejection.body_text(), "Rejected request body");
                Err(RestError::UnprocessableEntity {
                    message: rejection.body_text(),
                })
            }
        }
    }
}
