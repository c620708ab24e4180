//! Resource services.
//!
//! Services sit between the HTTP layer and the stores. They validate
//! payloads, merge patches over the current entity and resolve natural keys,
//! then hand complete entities to the store.
//!
//! A patch with no present fields is accepted as a no-op: the current entity
//! is returned and nothing is written.

mod appointment;
mod dentist;
mod patient;

pub use appointment::AppointmentService;
pub use dentist::DentistService;
pub use patient::PatientService;
