//! Path id extractor.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::RestError;

/// The numeric `{id}` segment of an instance route.
///
/// Anything that is not an integer is rejected with `400 Bad Request`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

impl ResourceId {
    /// Returns the id.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| RestError::invalid_id())?;

        raw.trim()
            .parse::<i64>()
            .map(ResourceId)
            .map_err(|_| RestError::invalid_id())
    }
}
