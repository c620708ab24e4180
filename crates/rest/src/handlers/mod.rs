//! HTTP request handlers.
//!
//! - [`patient`] - Patient CRUD and listing
//! - [`dentist`] - Dentist CRUD and listing
//! - [`appointment`] - Appointment CRUD, listing and booking by DNI
//! - [`health`] - Ping, health and probe endpoints

pub mod appointment;
pub mod dentist;
pub mod health;
pub mod patient;

pub use health::{health_handler, liveness_handler, ping_handler, readiness_handler};
