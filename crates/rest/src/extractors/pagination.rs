//! Pagination extractor.
//!
//! Reads `limit` and `offset` from the query string. Absent values fall back
//! to the configured default page size and offset 0; `limit` is capped at the
//! configured maximum.

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use clinic_persistence::error::ValidationError;
use clinic_persistence::query::Pagination;

use crate::error::RestError;
use crate::state::AppState;

/// Axum extractor for listing pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery(pub Pagination);

impl PageQuery {
    /// Resolves raw query parameters against the configured limits.
    pub fn from_params(
        params: &HashMap<String, String>,
        default: Pagination,
        max_limit: u32,
    ) -> Result<Self, ValidationError> {
        let limit = match parse_param(params, "limit")? {
            Some(0) => {
                return Err(ValidationError::InvalidPagination {
                    parameter: "limit".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
            Some(limit) => limit.min(max_limit),
            None => default.limit.min(max_limit),
        };
        let offset = parse_param(params, "offset")?.unwrap_or(default.offset);

        Ok(PageQuery(Pagination::new(limit, offset)))
    }

    /// Returns the resolved pagination.
    pub fn into_inner(self) -> Pagination {
        self.0
    }
}

fn parse_param(
    params: &HashMap<String, String>,
    name: &str,
) -> Result<Option<u32>, ValidationError> {
    match params.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ValidationError::InvalidPagination {
                parameter: name.to_string(),
                message: format!("'{}' is not a non-negative integer", raw),
            }),
    }
}

impl<S> FromRequestParts<AppState<S>> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: e.body_text(),
            })?;

        Ok(Self::from_params(
            &params,
            state.default_pagination(),
            state.max_page_size(),
        )?)
    }
}
