//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables.

use crate::constants::DEFAULT_PATIENTS_FILE;
use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    patients_file: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if `patients_file` is empty or names a directory.
    pub fn new(patients_file: PathBuf) -> PatientResult<Self> {
        if patients_file.as_os_str().is_empty() {
            return Err(PatientError::InvalidInput(
                "patients file path cannot be empty".into(),
            ));
        }
        if patients_file.is_dir() {
            return Err(PatientError::InvalidInput(format!(
                "patients file path is a directory: {}",
                patients_file.display()
            )));
        }

        Ok(Self { patients_file })
    }

    pub fn patients_file(&self) -> &Path {
        &self.patients_file
    }
}

/// Resolve the patients file path from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_PATIENTS_FILE`].
pub fn patients_file_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PATIENTS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_patients_file_from_env_value_defaults_when_blank() {
        assert_eq!(
            patients_file_from_env_value(None),
            PathBuf::from("patients.json")
        );
        assert_eq!(
            patients_file_from_env_value(Some("  ".into())),
            PathBuf::from("patients.json")
        );
        assert_eq!(
            patients_file_from_env_value(Some(" /data/p.json ".into())),
            PathBuf::from("/data/p.json")
        );
    }

    #[test]
    fn test_new_rejects_empty_path_and_directory() {
        let err = CoreConfig::new(PathBuf::new()).unwrap_err();
        assert!(matches!(err, PatientError::InvalidInput(msg) if msg.contains("cannot be empty")));

        let temp = TempDir::new().unwrap();
        let err = CoreConfig::new(temp.path().to_path_buf()).unwrap_err();
        assert!(matches!(err, PatientError::InvalidInput(msg) if msg.contains("is a directory")));
    }
}
