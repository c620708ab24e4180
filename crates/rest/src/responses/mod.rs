//! Response envelopes.
//!
//! Successful responses wrap their payload as `{"data": ...}`. Creation
//! answers `201 Created` with a `Location` header; deletion answers
//! `204 No Content` with an empty body.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::{HeaderValue, StatusCode, header};
use serde::Serialize;

/// The success envelope.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    /// The response payload.
    pub data: T,
}

/// `200 OK` with `data`.
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(DataEnvelope { data })).into_response()
}

/// `201 Created` with `data` and a `Location` header pointing at `location`.
pub fn created<T: Serialize>(location: &str, data: T) -> Response {
    let mut response = (StatusCode::CREATED, Json(DataEnvelope { data })).into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

/// `204 No Content`.
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_sets_location() {
        let response = created("/v1/patient/3", serde_json::json!({"id": 3}));
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/v1/patient/3"
        );
    }

    #[test]
    fn test_no_content() {
        assert_eq!(no_content().status(), StatusCode::NO_CONTENT);
    }
}
