//! Patient service.
//!
//! Every operation loads the whole store, works on it in memory and, for mutations, saves the
//! whole store back. Mutations run under one process-wide lock held across the full
//! load → modify → save cycle, so concurrent requests cannot overwrite each other's changes.
//! Reads take no lock; saves replace the file atomically.

use crate::record::{merge_update, Patient};
use crate::sort::{sort_records, SortField, SortOrder};
use crate::store::PatientStore;
use crate::{CoreConfig, PatientError, PatientResult};
use api_shared::pb::{CreatePatientReq, PatientMap, PatientRecord, UpdatePatientReq};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Pure patient data operations - no API concerns
#[derive(Clone, Debug)]
pub struct PatientService {
    store: PatientStore,
    write_lock: Arc<Mutex<()>>,
}

impl PatientService {
    /// Creates a service over the patients file named in `cfg`.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self::with_store(PatientStore::new(cfg.patients_file()))
    }

    pub fn with_store(store: PatientStore) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &PatientStore {
        &self.store
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a panic in another holder leaves nothing inconsistent.
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the entire store keyed by id.
    pub fn list(&self) -> PatientResult<PatientMap> {
        self.store.load()
    }

    /// Returns one patient.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::NotFound` if `id` is not in the store.
    pub fn get(&self, id: &str) -> PatientResult<PatientRecord> {
        self.store
            .load()?
            .swap_remove(id)
            .ok_or_else(|| PatientError::NotFound(id.to_string()))
    }

    /// Returns every record ordered by `sort_by`, ascending unless `order` says otherwise.
    ///
    /// Both parameters are checked before the store is read.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidSortField` / `InvalidSortOrder` for values outside
    /// `{height, weight, bmi}` / `{asc, desc}`.
    pub fn sort(&self, sort_by: &str, order: Option<&str>) -> PatientResult<Vec<PatientRecord>> {
        let field: SortField = sort_by.parse()?;
        let order = order
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();
        Ok(sort_records(self.store.load()?, field, order))
    }

    /// Validates and stores a new patient, returning its id.
    ///
    /// Any `bmi`/`verdict` supplied by the caller is ignored; both are derived here.
    ///
    /// # Errors
    ///
    /// Returns a `PatientError` if:
    /// - any field fails validation (`Validation`, listing every offending field),
    /// - the id is already present (`AlreadyExists`); the stored record is left untouched,
    /// - the store cannot be read or written.
    pub fn create(&self, req: CreatePatientReq) -> PatientResult<String> {
        let (id, record) = Patient::validate(req)?.into_entry();

        let _guard = self.lock();
        let mut patients = self.store.load()?;
        if patients.contains_key(&id) {
            return Err(PatientError::AlreadyExists(id));
        }
        patients.insert(id.clone(), record);
        self.store.save(&patients)?;

        tracing::info!("created patient {}", id);
        Ok(id)
    }

    /// Merges the fields present in `patch` into an existing patient.
    ///
    /// The merged record is validated as a whole and its derived fields recomputed before it
    /// replaces the stored one.
    ///
    /// # Errors
    ///
    /// Returns a `PatientError` if:
    /// - `id` is not in the store (`NotFound`),
    /// - the merged record fails validation (`Validation`),
    /// - the store cannot be read or written.
    pub fn update(&self, id: &str, patch: UpdatePatientReq) -> PatientResult<PatientRecord> {
        let _guard = self.lock();
        let mut patients = self.store.load()?;
        let existing = patients
            .get(id)
            .ok_or_else(|| PatientError::NotFound(id.to_string()))?;

        let candidate = merge_update(id, existing, patch);
        let (id, record) = Patient::validate(candidate)?.into_entry();
        patients.insert(id.clone(), record.clone());
        self.store.save(&patients)?;

        tracing::info!("updated patient {}", id);
        Ok(record)
    }

    /// Removes a patient, returning the record that was deleted.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::NotFound` if `id` is not in the store; the store is not rewritten.
    pub fn delete(&self, id: &str) -> PatientResult<PatientRecord> {
        let _guard = self.lock();
        let mut patients = self.store.load()?;
        let removed = patients
            .shift_remove(id)
            .ok_or_else(|| PatientError::NotFound(id.to_string()))?;
        self.store.save(&patients)?;

        tracing::info!("deleted patient {}", id);
        Ok(removed)
    }
}
