//! Patient resource.

// Fields are named after their JSON keys
#![allow(missing_docs)]

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{DNI_RANGE, FilterCriteria, Patch, Violations, datetime, int_param, text_param};
use crate::error::ValidationError;
use crate::query::Expression;

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    /// National identity document number.
    pub dni: i64,
    #[serde(with = "datetime")]
    pub discharge_date: NaiveDateTime,
}

/// Payload for creating or fully replacing a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub dni: i64,
    #[serde(with = "datetime")]
    pub discharge_date: NaiveDateTime,
}

impl NewPatient {
    /// Checks required fields and the DNI range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new("patient");
        violations.require_text("first_name", &self.first_name);
        violations.require_text("last_name", &self.last_name);
        violations.require_text("address", &self.address);
        violations.require_range("dni", self.dni, &DNI_RANGE);
        violations.finish()
    }

    /// Builds the entity stored under `id`.
    pub fn into_patient(self, id: i64) -> Patient {
        Patient {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            dni: self.dni,
            discharge_date: self.discharge_date,
        }
    }
}

/// Sparse patient update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientPatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub dni: Option<i64>,
    #[serde(default, with = "datetime::option")]
    pub discharge_date: Option<NaiveDateTime>,
}

impl Patch<Patient> for PatientPatch {
    fn apply(&self, mut existing: Patient) -> Patient {
        if let Some(first_name) = &self.first_name {
            existing.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            existing.last_name = last_name.clone();
        }
        if let Some(address) = &self.address {
            existing.address = address.clone();
        }
        if let Some(dni) = self.dni {
            existing.dni = dni;
        }
        if let Some(discharge_date) = self.discharge_date {
            existing.discharge_date = discharge_date;
        }
        existing
    }

    fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.address.is_none()
            && self.dni.is_none()
            && self.discharge_date.is_none()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new("patient");
        if let Some(dni) = self.dni {
            violations.require_range("dni", dni, &DNI_RANGE);
        }
        violations.finish()
    }
}

/// Listing criteria for patients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dni: Option<i64>,
}

impl FilterCriteria for PatientFilter {
    fn to_expressions(&self) -> Vec<Expression> {
        vec![
            Expression::eq("first_name", self.first_name.clone()),
            Expression::eq("last_name", self.last_name.clone()),
            Expression::eq("dni", self.dni),
        ]
    }

    fn from_params(params: &HashMap<String, String>) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: text_param(params, "first_name"),
            last_name: text_param(params, "last_name"),
            dni: int_param(params, "dni")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patient() -> Patient {
        Patient {
            id: 1,
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
            address: "Calle 1".to_string(),
            dni: 30_123_456,
            discharge_date: datetime::parse("2023-02-01 09:00:00").unwrap(),
        }
    }

    #[test]
    fn test_patch_overwrites_only_present_fields() {
        let patch = PatientPatch {
            address: Some(String::new()),
            ..Default::default()
        };
        let patched = patch.apply(patient());

        assert_eq!(patched.address, "");
        assert_eq!(patched.first_name, "Ana");
        assert_eq!(patched.dni, 30_123_456);
    }

    #[test]
    fn test_patch_is_idempotent() {
        let patch = PatientPatch {
            first_name: Some("Eva".to_string()),
            dni: Some(40_000_000),
            ..Default::default()
        };
        let once = patch.apply(patient());
        assert_eq!(patch.apply(once.clone()), once);
    }

    #[test]
    fn test_patch_validates_present_dni() {
        let patch = PatientPatch {
            dni: Some(123),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
        assert!(PatientPatch::default().validate().is_ok());
        assert!(PatientPatch::default().is_empty());
    }

    #[test]
    fn test_patch_deserializes_missing_and_null_as_absent() {
        let patch: PatientPatch =
            serde_json::from_value(json!({"last_name": "Diaz", "dni": null})).unwrap();
        assert_eq!(patch.last_name.as_deref(), Some("Diaz"));
        assert!(patch.dni.is_none());
        assert!(patch.discharge_date.is_none());
    }

    #[test]
    fn test_new_patient_validation() {
        let new = NewPatient {
            first_name: "".to_string(),
            last_name: "Lopez".to_string(),
            address: "Calle 1".to_string(),
            dni: 99_999_999,
            discharge_date: datetime::parse("2023-02-01 09:00:00").unwrap(),
        };
        let err = new.validate().unwrap_err();
        assert!(err.to_string().contains("first_name is required"));
    }

    #[test]
    fn test_filter_mapping() {
        let filter = PatientFilter {
            last_name: Some("Lopez".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.to_expressions().len(), 3);
        assert_eq!(filter.to_predicate().render(), "last_name='Lopez'");
    }

    #[test]
    fn test_serialized_date_format() {
        let value = serde_json::to_value(patient()).unwrap();
        assert_eq!(value["discharge_date"], "2023-02-01 09:00:00");
    }
}
