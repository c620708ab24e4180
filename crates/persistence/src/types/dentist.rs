//! Dentist resource.

// Fields are named after their JSON keys
#![allow(missing_docs)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{FilterCriteria, Patch, Violations, int_param, text_param};
use crate::error::ValidationError;
use crate::query::Expression;

/// A dentist working at the clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dentist {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Professional registration number, unique per dentist.
    pub registration_number: i64,
}

/// Payload for creating or fully replacing a dentist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDentist {
    pub first_name: String,
    pub last_name: String,
    pub registration_number: i64,
}

impl NewDentist {
    /// Checks required fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new("dentist");
        violations.require_text("first_name", &self.first_name);
        violations.require_text("last_name", &self.last_name);
        violations.require_positive("registration_number", self.registration_number);
        violations.finish()
    }

    /// Builds the entity stored under `id`.
    pub fn into_dentist(self, id: i64) -> Dentist {
        Dentist {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            registration_number: self.registration_number,
        }
    }
}

/// Sparse dentist update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DentistPatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub registration_number: Option<i64>,
}

impl Patch<Dentist> for DentistPatch {
    fn apply(&self, mut existing: Dentist) -> Dentist {
        if let Some(first_name) = &self.first_name {
            existing.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            existing.last_name = last_name.clone();
        }
        if let Some(registration_number) = self.registration_number {
            existing.registration_number = registration_number;
        }
        existing
    }

    fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.registration_number.is_none()
    }
}

/// Listing criteria for dentists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DentistFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub registration_number: Option<i64>,
}

impl FilterCriteria for DentistFilter {
    fn to_expressions(&self) -> Vec<Expression> {
        vec![
            Expression::eq("first_name", self.first_name.clone()),
            Expression::eq("last_name", self.last_name.clone()),
            Expression::eq("registration_number", self.registration_number),
        ]
    }

    fn from_params(params: &HashMap<String, String>) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: text_param(params, "first_name"),
            last_name: text_param(params, "last_name"),
            registration_number: int_param(params, "registration_number")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dentist() -> Dentist {
        Dentist {
            id: 7,
            first_name: "Juan".to_string(),
            last_name: "Perez".to_string(),
            registration_number: 1234,
        }
    }

    #[test]
    fn test_patch_sets_explicit_zero() {
        let patch = DentistPatch {
            registration_number: Some(0),
            ..Default::default()
        };
        let patched = patch.apply(dentist());
        assert_eq!(patched.registration_number, 0);
        assert_eq!(patched.first_name, "Juan");
        assert_eq!(patched.id, 7);
    }

    #[test]
    fn test_patch_sets_explicit_empty_string() {
        let patch = DentistPatch {
            last_name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(patch.apply(dentist()).last_name, "");
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let patch = DentistPatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.apply(dentist()), dentist());
    }

    #[test]
    fn test_new_dentist_requires_registration_number() {
        let new = NewDentist {
            first_name: "Juan".to_string(),
            last_name: "Perez".to_string(),
            registration_number: 0,
        };
        assert!(new.validate().is_err());
    }

    #[test]
    fn test_filter_from_params() {
        let params: HashMap<String, String> = [
            ("registration_number".to_string(), "1234".to_string()),
            ("first_name".to_string(), "".to_string()),
        ]
        .into_iter()
        .collect();

        let filter = DentistFilter::from_params(&params).unwrap();
        assert_eq!(filter.registration_number, Some(1234));
        assert!(filter.first_name.is_none());
        assert_eq!(filter.to_predicate().render(), "registration_number=1234");
    }

    #[test]
    fn test_filter_rejects_non_numeric_registration_number() {
        let params: HashMap<String, String> =
            [("registration_number".to_string(), "abc".to_string())]
                .into_iter()
                .collect();
        assert!(matches!(
            DentistFilter::from_params(&params),
            Err(ValidationError::InvalidFilterValue { .. })
        ));
    }
}
