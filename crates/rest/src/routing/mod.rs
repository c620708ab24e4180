//! Route configuration for the clinic API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod clinic_routes;

pub use clinic_routes::create_routes;
