//! Whole-file JSON store.
//!
//! The store is one JSON object keyed by patient id. Every read deserializes the entire file and
//! every write replaces it. Writes go to a sibling temporary file which is then renamed over the
//! store, so readers observe either the old or the new document, never a truncated one.
//!
//! ```text
//! patients.json        # {"P001": {...}, "P002": {...}}
//! patients.json.tmp    # only present while a save is in flight
//! ```

use crate::constants::STORE_TEMP_SUFFIX;
use crate::{PatientError, PatientResult};
use api_shared::pb::PatientMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct PatientStore {
    path: PathBuf,
}

impl PatientStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty store if the file does not exist yet.
    ///
    /// # Returns
    ///
    /// `true` if a new empty store was written, `false` if one was already present.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::StoreDirMissing` if the parent directory does not exist, or a
    /// write error if the empty document cannot be saved.
    pub fn ensure_exists(&self) -> PatientResult<bool> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(PatientError::StoreDirMissing(parent.to_path_buf()));
            }
        }

        if self.path.exists() {
            return Ok(false);
        }

        self.save(&PatientMap::new())?;
        Ok(true)
    }

    /// Read and deserialize the whole store.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::FileRead` if the file is missing or unreadable, or
    /// `PatientError::Deserialization` if it is not a valid patients document.
    pub fn load(&self) -> PatientResult<PatientMap> {
        let raw = fs::read_to_string(&self.path).map_err(PatientError::FileRead)?;
        let patients: PatientMap =
            serde_json::from_str(&raw).map_err(PatientError::Deserialization)?;
        tracing::debug!(
            "loaded {} patients from {}",
            patients.len(),
            self.path.display()
        );
        Ok(patients)
    }

    /// Serialize and replace the whole store.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::Serialization` or `PatientError::FileWrite`. On failure the
    /// previous document is left in place.
    pub fn save(&self, patients: &PatientMap) -> PatientResult<()> {
        let json = serde_json::to_string_pretty(patients).map_err(PatientError::Serialization)?;
        let temp_path = self.temp_path()?;

        let written = fs::File::create(&temp_path).and_then(|mut file| {
            file.write_all(json.as_bytes())?;
            file.sync_all()
        });

        if let Err(e) = written.and_then(|()| fs::rename(&temp_path, &self.path)) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                tracing::warn!(
                    "failed to remove {} after write error: {}",
                    temp_path.display(),
                    cleanup
                );
            }
            return Err(PatientError::FileWrite(e));
        }

        Ok(())
    }

    fn temp_path(&self) -> PatientResult<PathBuf> {
        let mut name = self
            .path
            .file_name()
            .ok_or_else(|| {
                PatientError::InvalidInput(format!(
                    "patients file path has no file name: {}",
                    self.path.display()
                ))
            })?
            .to_os_string();
        name.push(STORE_TEMP_SUFFIX);
        Ok(self.path.with_file_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::pb::{Gender, PatientRecord, Verdict};
    use tempfile::TempDir;

    fn record(name: &str, height: f64, weight: f64) -> PatientRecord {
        PatientRecord {
            name: name.into(),
            city: "Delhi".into(),
            age: 35,
            gender: Gender::Male,
            height,
            weight,
            bmi: Some(crate::record::compute_bmi(height, weight)),
            verdict: Some(Verdict::Normal),
        }
    }

    #[test]
    fn test_save_then_load_whole_store() {
        let temp = TempDir::new().unwrap();
        let store = PatientStore::new(temp.path().join("patients.json"));

        let mut patients = PatientMap::new();
        patients.insert("P001".into(), record("Ravi", 1.75, 70.0));
        patients.insert("P002".into(), record("Neha", 1.6, 55.0));
        store.save(&patients).unwrap();

        assert_eq!(store.load().unwrap(), patients);
    }

    #[test]
    fn test_persisted_values_omit_id() {
        let temp = TempDir::new().unwrap();
        let store = PatientStore::new(temp.path().join("patients.json"));

        let mut patients = PatientMap::new();
        patients.insert("P001".into(), record("Ravi", 1.75, 70.0));
        store.save(&patients).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        let value = raw.get("P001").unwrap().as_object().unwrap();
        assert!(!value.contains_key("id"));
        for key in [
            "name", "city", "age", "gender", "height", "weight", "bmi", "verdict",
        ] {
            assert!(value.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_file_key_order_survives_load_and_save() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("patients.json");
        let seeded = r#"{
            "P9": {"name":"Ravi","city":"Pune","age":40,"gender":"male","height":1.8,"weight":80},
            "P10": {"name":"Neha","city":"Pune","age":31,"gender":"female","height":1.6,"weight":55}
        }"#;
        fs::write(&path, seeded).unwrap();

        let store = PatientStore::new(path);
        let patients = store.load().unwrap();
        assert_eq!(patients.keys().collect::<Vec<_>>(), vec!["P9", "P10"]);

        store.save(&patients).unwrap();
        let written = fs::read_to_string(store.path()).unwrap();
        assert!(written.find("\"P9\"").unwrap() < written.find("\"P10\"").unwrap());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = PatientStore::new(temp.path().join("patients.json"));
        store.save(&PatientMap::new()).unwrap();

        assert!(store.path().is_file());
        assert!(!temp.path().join("patients.json.tmp").exists());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let store = PatientStore::new(temp.path().join("absent.json"));
        assert!(matches!(store.load(), Err(PatientError::FileRead(_))));
    }

    #[test]
    fn test_load_corrupt_file_is_deserialization_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("patients.json");
        fs::write(&path, "{\"P001\": {\"name\": ").unwrap();

        let store = PatientStore::new(path);
        assert!(matches!(
            store.load(),
            Err(PatientError::Deserialization(_))
        ));
    }

    #[test]
    fn test_ensure_exists_creates_empty_store_once() {
        let temp = TempDir::new().unwrap();
        let store = PatientStore::new(temp.path().join("patients.json"));

        assert!(store.ensure_exists().unwrap());
        assert!(store.load().unwrap().is_empty());

        let mut patients = PatientMap::new();
        patients.insert("P001".into(), record("Ravi", 1.75, 70.0));
        store.save(&patients).unwrap();

        assert!(!store.ensure_exists().unwrap());
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_ensure_exists_requires_parent_directory() {
        let temp = TempDir::new().unwrap();
        let store = PatientStore::new(temp.path().join("missing").join("patients.json"));
        assert!(matches!(
            store.ensure_exists(),
            Err(PatientError::StoreDirMissing(_))
        ));
    }
}
