//! Constants used throughout the core crate.

/// Default location of the patients file when `PATIENTS_FILE` is not set.
pub const DEFAULT_PATIENTS_FILE: &str = "patients.json";

/// Suffix appended to the store filename for the in-flight copy during a save.
pub const STORE_TEMP_SUFFIX: &str = ".tmp";

/// Ages are valid when strictly between these bounds.
pub const AGE_EXCLUSIVE_MIN: i64 = 0;
pub const AGE_EXCLUSIVE_MAX: i64 = 120;

/// BMI below this is `Underweight`.
pub const BMI_NORMAL_FROM: f64 = 18.5;

/// BMI at or above this is `Overweight`.
pub const BMI_OVERWEIGHT_FROM: f64 = 25.0;
