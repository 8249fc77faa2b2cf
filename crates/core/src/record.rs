//! Patient record model and derived fields.
//!
//! A [`Patient`] only exists once every base field has passed validation. BMI and verdict are
//! never taken from input: they are computed from height and weight each time a record is
//! turned into its stored form.

use crate::constants::{BMI_NORMAL_FROM, BMI_OVERWEIGHT_FROM};
use crate::validation::{ValidationError, Validator};
use api_shared::pb::{CreatePatientReq, Gender, PatientRecord, UpdatePatientReq, Verdict};
use pms_types::NonEmptyText;

/// A fully validated patient.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    pub id: NonEmptyText,
    pub name: NonEmptyText,
    pub city: NonEmptyText,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
}

impl Patient {
    /// Validate every field of `req`, reporting all failures together.
    pub fn validate(req: CreatePatientReq) -> Result<Self, ValidationError> {
        let mut v = Validator::default();

        let id = v.text("id", req.id);
        let name = v.text("name", req.name);
        let city = v.text("city", req.city);
        let age = v.age("age", req.age);
        let gender = v.gender("gender", req.gender);
        let height = v.positive("height", req.height);
        let weight = v.positive("weight", req.weight);

        match (id, name, city, age, gender, height, weight) {
            (
                Some(id),
                Some(name),
                Some(city),
                Some(age),
                Some(gender),
                Some(height),
                Some(weight),
            ) if v.is_clean() => Ok(Self {
                id,
                name,
                city,
                age,
                gender,
                height,
                weight,
            }),
            _ => Err(v.into_error()),
        }
    }

    pub fn bmi(&self) -> f64 {
        compute_bmi(self.height, self.weight)
    }

    pub fn verdict(&self) -> Verdict {
        verdict_for(self.bmi())
    }

    /// Split into the store key and the persisted value, with derived fields filled in.
    pub fn into_entry(self) -> (String, PatientRecord) {
        let bmi = self.bmi();
        let record = PatientRecord {
            name: self.name.into_string(),
            city: self.city.into_string(),
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            bmi: Some(bmi),
            verdict: Some(verdict_for(bmi)),
        };
        (self.id.into_string(), record)
    }
}

/// `weight / height²` rounded to two decimals.
///
/// Rounding goes through the exact decimal expansion of the quotient, so exact ties round to
/// the even digit (`20.125` becomes `20.12`).
pub fn compute_bmi(height: f64, weight: f64) -> f64 {
    let raw = weight / (height * height);
    format!("{raw:.2}").parse().unwrap_or(raw)
}

pub fn verdict_for(bmi: f64) -> Verdict {
    if bmi < BMI_NORMAL_FROM {
        Verdict::Underweight
    } else if bmi < BMI_OVERWEIGHT_FROM {
        Verdict::Normal
    } else {
        Verdict::Overweight
    }
}

/// Overlay the fields present in `patch` on the stored base fields of `existing`.
///
/// The result is a full candidate that must go through [`Patient::validate`] again. Stored
/// derived fields are dropped here; they are recomputed after validation.
pub fn merge_update(
    id: &str,
    existing: &PatientRecord,
    patch: UpdatePatientReq,
) -> CreatePatientReq {
    CreatePatientReq {
        id: Some(id.to_string()),
        name: patch.name.or_else(|| Some(existing.name.clone())),
        city: patch.city.or_else(|| Some(existing.city.clone())),
        age: patch.age.or(Some(i64::from(existing.age))),
        gender: patch
            .gender
            .or_else(|| Some(existing.gender.as_str().to_string())),
        height: patch.height.or(Some(existing.height)),
        weight: patch.weight.or(Some(existing.weight)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req() -> CreatePatientReq {
        CreatePatientReq {
            id: Some("P001".into()),
            name: Some("Ananya Verma".into()),
            city: Some("Guwahati".into()),
            age: Some(28),
            gender: Some("female".into()),
            height: Some(1.7),
            weight: Some(70.0),
        }
    }

    #[test]
    fn test_bmi_matches_documented_example() {
        assert_eq!(compute_bmi(1.7, 70.0), 24.22);
        assert_eq!(verdict_for(24.22), Verdict::Normal);
    }

    #[test]
    fn test_verdict_band_boundaries() {
        // 74 / 2² = 18.5 exactly
        assert_eq!(compute_bmi(2.0, 74.0), 18.5);
        assert_eq!(verdict_for(compute_bmi(2.0, 74.0)), Verdict::Normal);
        assert_eq!(verdict_for(18.49), Verdict::Underweight);
        // 100 / 2² = 25 exactly
        assert_eq!(verdict_for(compute_bmi(2.0, 100.0)), Verdict::Overweight);
        assert_eq!(verdict_for(24.99), Verdict::Normal);
    }

    #[test]
    fn test_exact_ties_round_to_even() {
        // 80.5 / 2² = 20.125 exactly
        assert_eq!(compute_bmi(2.0, 80.5), 20.12);
        // 81.5 / 2² = 20.375 exactly
        assert_eq!(compute_bmi(2.0, 81.5), 20.38);
    }

    #[test]
    fn test_verdict_uses_rounded_bmi() {
        // 73.9984 / 4 = 18.4996, rounds up into the Normal band
        assert_eq!(compute_bmi(2.0, 73.9984), 18.5);
        let mut r = req();
        r.height = Some(2.0);
        r.weight = Some(73.9984);
        assert_eq!(Patient::validate(r).unwrap().verdict(), Verdict::Normal);
    }

    #[test]
    fn test_validate_reports_every_offending_field() {
        let err = Patient::validate(CreatePatientReq {
            id: Some("P002".into()),
            name: None,
            city: Some(" ".into()),
            age: Some(130),
            gender: Some("robot".into()),
            height: Some(0.0),
            weight: Some(-3.0),
        })
        .unwrap_err();

        assert_eq!(
            err.fields(),
            vec!["name", "city", "age", "gender", "height", "weight"]
        );
    }

    #[test]
    fn test_into_entry_strips_id_and_fills_derived_fields() {
        let (id, record) = Patient::validate(req()).unwrap().into_entry();
        assert_eq!(id, "P001");
        assert_eq!(record.name, "Ananya Verma");
        assert_eq!(record.bmi, Some(24.22));
        assert_eq!(record.verdict, Some(Verdict::Normal));
    }

    #[test]
    fn test_merge_update_keeps_unspecified_fields() {
        let (id, existing) = Patient::validate(req()).unwrap().into_entry();
        let merged = merge_update(
            &id,
            &existing,
            UpdatePatientReq {
                weight: Some(95.0),
                ..Default::default()
            },
        );

        let patient = Patient::validate(merged).unwrap();
        assert_eq!(patient.weight, 95.0);
        assert_eq!(patient.height, 1.7);
        assert_eq!(patient.age, 28);
        assert_eq!(patient.gender, Gender::Female);
        assert_eq!(patient.bmi(), 32.87);
        assert_eq!(patient.verdict(), Verdict::Overweight);
    }

    #[test]
    fn test_merge_update_revalidates_whole_candidate() {
        let (id, existing) = Patient::validate(req()).unwrap().into_entry();
        let merged = merge_update(
            &id,
            &existing,
            UpdatePatientReq {
                age: Some(0),
                ..Default::default()
            },
        );
        assert_eq!(Patient::validate(merged).unwrap_err().fields(), vec!["age"]);
    }
}
