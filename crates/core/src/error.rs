use crate::validation::ValidationError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("patient not found: {0}")]
    NotFound(String),
    #[error("patient already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid sort field '{0}', select from [height, weight, bmi]")]
    InvalidSortField(String),
    #[error("invalid sort order '{0}', select from [asc, desc]")]
    InvalidSortOrder(String),
    #[error("patient store directory does not exist: {}", .0.display())]
    StoreDirMissing(PathBuf),
    #[error("failed to read patient store: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write patient store: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize patient store: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize patient store: {0}")]
    Deserialization(serde_json::Error),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
