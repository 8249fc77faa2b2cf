//! # PMS Core
//!
//! Core business logic for the patient management service.
//!
//! This crate contains pure data operations:
//! - Patient validation and derived fields (BMI, verdict)
//! - The whole-file JSON store under `PATIENTS_FILE`
//! - `PatientService`, the single writer for that store
//!
//! **No API concerns**: HTTP servers and CLI parsing belong in `api-rest` and `pms-cli`.

pub mod config;
pub mod constants;
pub mod error;
pub mod patient;
pub mod record;
pub mod sort;
pub mod store;
pub mod validation;

// Wire types are shared with the API crates.
pub use api_shared::pb;

pub use config::CoreConfig;
pub use constants::DEFAULT_PATIENTS_FILE;
pub use error::{PatientError, PatientResult};
pub use patient::PatientService;
pub use record::{compute_bmi, verdict_for, Patient};
pub use sort::{SortField, SortOrder};
pub use store::PatientStore;
pub use validation::{FieldError, ValidationError};
