//! Input validation utilities.
//!
//! Field checks record their failure in a [`Validator`] instead of returning early, so a single
//! request reports every offending field at once.

use crate::constants::{AGE_EXCLUSIVE_MAX, AGE_EXCLUSIVE_MIN};
use api_shared::Gender;
use pms_types::NonEmptyText;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All fields rejected while validating one patient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fields: {}", join_fields(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field).collect()
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Default)]
pub(crate) struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn required<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.reject(field, "is required");
        }
        value
    }

    pub(crate) fn text(
        &mut self,
        field: &'static str,
        value: Option<String>,
    ) -> Option<NonEmptyText> {
        let value = self.required(field, value)?;
        match NonEmptyText::new(&value) {
            Ok(text) => Some(text),
            Err(_) => {
                self.reject(field, "must not be empty");
                None
            }
        }
    }

    pub(crate) fn age(&mut self, field: &'static str, value: Option<i64>) -> Option<u32> {
        let value = self.required(field, value)?;
        if value <= AGE_EXCLUSIVE_MIN {
            self.reject(field, format!("must be greater than {AGE_EXCLUSIVE_MIN}"));
            return None;
        }
        if value >= AGE_EXCLUSIVE_MAX {
            self.reject(field, format!("must be less than {AGE_EXCLUSIVE_MAX}"));
            return None;
        }
        u32::try_from(value).ok()
    }

    pub(crate) fn gender(&mut self, field: &'static str, value: Option<String>) -> Option<Gender> {
        let value = self.required(field, value)?;
        match value.parse::<Gender>() {
            Ok(gender) => Some(gender),
            Err(_) => {
                self.reject(field, "must be one of: male, female, others");
                None
            }
        }
    }

    pub(crate) fn positive(&mut self, field: &'static str, value: Option<f64>) -> Option<f64> {
        let value = self.required(field, value)?;
        if !value.is_finite() {
            self.reject(field, "must be a finite number");
            return None;
        }
        if value <= 0.0 {
            self.reject(field, "must be greater than 0");
            return None;
        }
        Some(value)
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn into_error(self) -> ValidationError {
        ValidationError {
            errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_bounds_are_exclusive() {
        let mut v = Validator::default();
        assert_eq!(v.age("age", Some(1)), Some(1));
        assert_eq!(v.age("age", Some(119)), Some(119));
        assert!(v.is_clean());

        assert_eq!(v.age("age", Some(0)), None);
        assert_eq!(v.age("age", Some(120)), None);
        assert_eq!(v.age("age", Some(-5)), None);
        let err = v.into_error();
        assert_eq!(err.errors().len(), 3);
        assert_eq!(err.errors()[0].message, "must be greater than 0");
        assert_eq!(err.errors()[1].message, "must be less than 120");
    }

    #[test]
    fn test_positive_rejects_zero_negative_and_non_finite() {
        let mut v = Validator::default();
        assert_eq!(v.positive("height", Some(0.0)), None);
        assert_eq!(v.positive("height", Some(-1.2)), None);
        assert_eq!(v.positive("weight", Some(f64::INFINITY)), None);
        assert_eq!(v.positive("weight", Some(62.5)), Some(62.5));
        assert_eq!(v.into_error().errors().len(), 3);
    }

    #[test]
    fn test_missing_and_blank_text_are_reported() {
        let mut v = Validator::default();
        assert_eq!(v.text("name", None), None);
        assert_eq!(v.text("city", Some("   ".into())), None);
        let err = v.into_error();
        assert_eq!(err.fields(), vec!["name", "city"]);
        assert_eq!(
            err.to_string(),
            "invalid fields: name is required; city must not be empty"
        );
    }

    #[test]
    fn test_gender_outside_allowed_set() {
        let mut v = Validator::default();
        assert_eq!(v.gender("gender", Some("unknown".into())), None);
        assert_eq!(v.gender("gender", Some("female".into())), Some(Gender::Female));
        assert_eq!(v.into_error().fields(), vec!["gender"]);
    }
}
