//! Query-time ordering of the store.

use crate::{PatientError, PatientResult};
use api_shared::pb::{PatientMap, PatientRecord};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    /// Missing values order as 0.
    fn key(self, record: &PatientRecord) -> f64 {
        match self {
            SortField::Height => record.height,
            SortField::Weight => record.weight,
            SortField::Bmi => record.bmi.unwrap_or(0.0),
        }
    }
}

impl FromStr for SortField {
    type Err = PatientError;

    fn from_str(s: &str) -> PatientResult<Self> {
        match s {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            other => Err(PatientError::InvalidSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = PatientError;

    fn from_str(s: &str) -> PatientResult<Self> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(PatientError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Return every record ordered by `field`.
///
/// The sort is stable in both directions: records with equal keys keep store order, including
/// when descending.
pub fn sort_records(
    patients: PatientMap,
    field: SortField,
    order: SortOrder,
) -> Vec<PatientRecord> {
    let mut records: Vec<PatientRecord> = patients.into_values().collect();
    match order {
        SortOrder::Asc => records.sort_by(|a, b| field.key(a).total_cmp(&field.key(b))),
        SortOrder::Desc => records.sort_by(|a, b| field.key(b).total_cmp(&field.key(a))),
    }
    records
}
