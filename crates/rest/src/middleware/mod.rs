//! HTTP middleware for the clinic API.
//!
//! - [`auth`] - Shared-secret `TOKEN` header check for write routes

pub mod auth;

pub use auth::{TOKEN_HEADER, require_token};
