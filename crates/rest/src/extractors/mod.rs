//! Axum extractors for the clinic API.
//!
//! - [`JsonBody`] - Deserialize a request body, rejecting with 422
//! - [`ResourceId`] - Parse the `{id}` path segment, rejecting with 400
//! - [`PageQuery`] - Read `limit`/`offset` with configured defaults
//! - [`FilterQuery`] - Parse a resource filter from the query string

mod filter;
mod json_body;
mod pagination;
mod resource_id;

pub use filter::FilterQuery;
pub use json_body::JsonBody;
pub use pagination::PageQuery;
pub use resource_id::ResourceId;
