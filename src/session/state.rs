use std::path::{Path, PathBuf};

use super::CleanedUpload;
use crate::error::{CleaningError, Result};

/// Whether a cleaned result exists for the file most recently uploaded.
///
/// Returned by the upload step and handed to the export step; export is only
/// possible from `ResultReady`.
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    #[default]
    NoResultReady,
    ResultReady(CleanedUpload),
}

impl ResultState {
    pub fn as_str(&self) -> &str {
        match self {
            ResultState::NoResultReady => "NoResultReady",
            ResultState::ResultReady(_) => "ResultReady",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ResultState::ResultReady(_))
    }

    pub fn result(&self) -> Option<&CleanedUpload> {
        match self {
            ResultState::ResultReady(upload) => Some(upload),
            ResultState::NoResultReady => None,
        }
    }

    /// Export under `Filtered_<base>.csv` inside `dir`.
    pub fn export_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let upload = self.result().ok_or(CleaningError::NoFileSelected)?;
        crate::export::export_to_dir(&upload.records, dir, &upload.source_name)
    }

    /// Export to an explicit destination file.
    pub fn export_to_path<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let upload = self.result().ok_or(CleaningError::NoFileSelected)?;
        crate::export::export_to_path(&upload.records, path)
    }
}

impl From<Result<CleanedUpload>> for ResultState {
    fn from(outcome: Result<CleanedUpload>) -> Self {
        match outcome {
            Ok(upload) => ResultState::ResultReady(upload),
            Err(_) => ResultState::NoResultReady,
        }
    }
}
