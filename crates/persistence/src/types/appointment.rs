//! Appointment resource.

// Fields are named after their JSON keys
#![allow(missing_docs)]

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{
    DNI_RANGE, FilterCriteria, Patch, Violations, datetime, datetime_param, int_param,
};
use crate::error::ValidationError;
use crate::query::Expression;

/// An appointment between a patient and a dentist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub dentist_id: i64,
    #[serde(with = "datetime")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub description: String,
}

/// Payload for creating or fully replacing an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub dentist_id: i64,
    #[serde(with = "datetime")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub description: String,
}

impl NewAppointment {
    /// Checks that both references look like ids.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new("appointment");
        violations.require_positive("patient_id", self.patient_id);
        violations.require_positive("dentist_id", self.dentist_id);
        violations.finish()
    }

    /// Builds the entity stored under `id`.
    pub fn into_appointment(self, id: i64) -> Appointment {
        Appointment {
            id,
            patient_id: self.patient_id,
            dentist_id: self.dentist_id,
            date: self.date,
            description: self.description,
        }
    }
}

/// Payload for booking an appointment by natural keys.
///
/// The patient is looked up by DNI and the dentist by registration number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointmentByDni {
    pub patient_dni: i64,
    /// The dentist's registration number.
    pub dentist_number: i64,
    #[serde(with = "datetime")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub description: String,
}

impl NewAppointmentByDni {
    /// Checks the DNI range and the registration number.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new("appointment");
        violations.require_range("patient_dni", self.patient_dni, &DNI_RANGE);
        violations.require_positive("dentist_number", self.dentist_number);
        violations.finish()
    }

    /// Resolves into a regular create payload once both ids are known.
    pub fn resolve(self, patient_id: i64, dentist_id: i64) -> NewAppointment {
        NewAppointment {
            patient_id,
            dentist_id,
            date: self.date,
            description: self.description,
        }
    }
}

/// Sparse appointment update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentPatch {
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub dentist_id: Option<i64>,
    #[serde(default, with = "datetime::option")]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Patch<Appointment> for AppointmentPatch {
    fn apply(&self, mut existing: Appointment) -> Appointment {
        if let Some(patient_id) = self.patient_id {
            existing.patient_id = patient_id;
        }
        if let Some(dentist_id) = self.dentist_id {
            existing.dentist_id = dentist_id;
        }
        if let Some(date) = self.date {
            existing.date = date;
        }
        if let Some(description) = &self.description {
            existing.description = description.clone();
        }
        existing
    }

    fn is_empty(&self) -> bool {
        self.patient_id.is_none()
            && self.dentist_id.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }
}

/// Listing criteria for appointments.
///
/// `dni` filters on the joined patient row; the date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub patient_id: Option<i64>,
    pub dentist_id: Option<i64>,
    pub dni: Option<i64>,
    pub from_date: Option<NaiveDateTime>,
    pub to_date: Option<NaiveDateTime>,
}

impl FilterCriteria for AppointmentFilter {
    fn to_expressions(&self) -> Vec<Expression> {
        vec![
            Expression::eq("patient_id", self.patient_id),
            Expression::eq("dentist_id", self.dentist_id),
            Expression::eq("dni", self.dni),
            Expression::ge("date", self.from_date),
            Expression::le("date", self.to_date),
        ]
    }

    fn from_params(params: &HashMap<String, String>) -> Result<Self, ValidationError> {
        Ok(Self {
            patient_id: int_param(params, "patient_id")?,
            dentist_id: int_param(params, "dentist_id")?,
            dni: int_param(params, "dni")?,
            from_date: datetime_param(params, "from_date")?,
            to_date: datetime_param(params, "to_date")?,
        })
    }
}
