//! Domain types for the clinic resources.
//!
//! Each resource comes with four shapes:
//!
//! - the stored entity ([`Patient`], [`Dentist`], [`Appointment`])
//! - a `New*` payload used for create and full replace, validated on entry
//! - a `*Patch` payload where every field is optional ([`Patch`])
//! - a `*Filter` of optional listing criteria ([`FilterCriteria`])

pub mod appointment;
pub mod datetime;
pub mod dentist;
pub mod patient;

use std::collections::HashMap;
use std::ops::RangeInclusive;

pub use appointment::{
    Appointment, AppointmentFilter, AppointmentPatch, NewAppointment, NewAppointmentByDni,
};
pub use dentist::{Dentist, DentistFilter, DentistPatch, NewDentist};
pub use patient::{NewPatient, Patient, PatientFilter, PatientPatch};

use crate::error::{ValidationDetail, ValidationError};
use crate::query::{Expression, Predicate};

/// Valid national identity document numbers.
pub const DNI_RANGE: RangeInclusive<i64> = 10_000_000..=99_999_999;

/// Optional listing criteria for a resource.
///
/// Each field maps to exactly one [`Expression`] with a fixed operator.
/// Absent fields are passed through as absent values; the predicate layer
/// drops them when rendering.
pub trait FilterCriteria: Sized {
    /// Returns one expression per filter field, in a stable order.
    fn to_expressions(&self) -> Vec<Expression>;

    /// Parses raw query-string parameters.
    ///
    /// Blank values count as absent. Unknown keys are ignored.
    fn from_params(params: &HashMap<String, String>) -> Result<Self, ValidationError>;

    /// Combines all expressions with `AND`.
    fn to_predicate(&self) -> Predicate {
        Predicate::and(self.to_expressions())
    }
}

/// A sparse update for an entity of type `T`.
///
/// Present fields always overwrite the target, zero values included.
pub trait Patch<T> {
    /// Overlays the present fields onto `existing`.
    fn apply(&self, existing: T) -> T;

    /// Returns true if no field is present.
    fn is_empty(&self) -> bool;

    /// Validates the present fields.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Collects field violations for one payload.
pub(crate) struct Violations {
    resource_type: &'static str,
    details: Vec<ValidationDetail>,
}

impl Violations {
    pub(crate) fn new(resource_type: &'static str) -> Self {
        Self {
            resource_type,
            details: Vec::new(),
        }
    }

    pub(crate) fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.details.push(ValidationDetail::new(field, "is required"));
        }
    }

    pub(crate) fn require_range(&mut self, field: &str, value: i64, range: &RangeInclusive<i64>) {
        if !range.contains(&value) {
            self.details.push(ValidationDetail::new(
                field,
                format!("must be between {} and {}", range.start(), range.end()),
            ));
        }
    }

    pub(crate) fn require_positive(&mut self, field: &str, value: i64) {
        if value <= 0 {
            self.details
                .push(ValidationDetail::new(field, "must be greater than 0"));
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.details.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::InvalidResource {
                resource_type: self.resource_type.to_string(),
                details: self.details,
            })
        }
    }
}

fn non_blank<'a>(params: &'a HashMap<String, String>, field: &str) -> Option<&'a str> {
    params
        .get(field)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

pub(crate) fn text_param(params: &HashMap<String, String>, field: &str) -> Option<String> {
    non_blank(params, field).map(str::to_string)
}

pub(crate) fn int_param(
    params: &HashMap<String, String>,
    field: &str,
) -> Result<Option<i64>, ValidationError> {
    non_blank(params, field)
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|_| ValidationError::InvalidFilterValue {
                    field: field.to_string(),
                    value: raw.to_string(),
                    message: "expected an integer".to_string(),
                })
        })
        .transpose()
}

pub(crate) fn datetime_param(
    params: &HashMap<String, String>,
    field: &str,
) -> Result<Option<chrono::NaiveDateTime>, ValidationError> {
    non_blank(params, field)
        .map(|raw| {
            datetime::parse(raw).map_err(|_| ValidationError::InvalidFilterValue {
                field: field.to_string(),
                value: raw.to_string(),
                message: "expected YYYY-MM-DD HH:MM:SS".to_string(),
            })
        })
        .transpose()
}
