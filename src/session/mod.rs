// src/session/mod.rs
pub mod state;

pub use state::ResultState;

use anyhow::{Context, Result};
use glob::glob;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use tracing::{error, info, warn};

use crate::clean::clean;
use crate::error::CleaningError;
use crate::export::default_export_name;
use crate::table::{read_raw_path, CleanedRecordSet};

/// A successfully cleaned upload, held until it is exported or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedUpload {
    /// File name of the upload, without directories.
    pub source_name: String,
    pub records: CleanedRecordSet,
}

impl CleanedUpload {
    /// Default download name, `Filtered_<base>.csv`.
    pub fn export_name(&self) -> String {
        default_export_name(&self.source_name)
    }
}

/// Read and clean one uploaded file. `None` means nothing was selected.
#[tracing::instrument(level = "info", skip(path), fields(path = ?path.map(|p| p.display().to_string())))]
pub fn upload(path: Option<&Path>) -> std::result::Result<CleanedUpload, CleaningError> {
    let path = path.ok_or(CleaningError::NoFileSelected)?;
    let source_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let raw = read_raw_path(path)?;
    info!(rows = raw.len(), columns = raw.headers.len(), "file has been uploaded");

    let records = clean(raw)?;
    Ok(CleanedUpload {
        source_name,
        records,
    })
}

/// Outcome of cleaning every file matched by a glob pattern.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// (input, export) pairs for files that cleaned successfully.
    pub exported: Vec<(PathBuf, PathBuf)>,
    /// (input, message) pairs for files that were skipped.
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Clean each file matching `pattern`, one after another, exporting into
/// `out_dir`. A bad file is recorded in the report and does not stop the rest.
///
/// Two inputs sharing an export name (`jan.csv`, `jan.v2.csv`) would write the
/// same `Filtered_jan.csv`; the later one is reported as failed instead.
pub fn clean_batch(pattern: &str, out_dir: &Path) -> Result<BatchReport> {
    let paths: Vec<PathBuf> = glob(pattern)
        .with_context(|| format!("Failed to parse glob pattern: {}", pattern))?
        .filter_map(|p| p.ok())
        .filter(|p| p.is_file())
        .collect();

    if paths.is_empty() {
        anyhow::bail!("No files found matching pattern: {}", pattern);
    }
    info!("Found {} files matching pattern: {}", paths.len(), pattern);

    let mut report = BatchReport::default();
    // export name → input that claimed it
    let mut claimed: HashMap<String, PathBuf> = HashMap::new();
    for path in paths {
        let state = match upload(Some(&path)) {
            Ok(cleaned) => ResultState::ResultReady(cleaned),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping file");
                report.failed.push((path, e.to_string()));
                continue;
            }
        };
        let export_name = state
            .result()
            .map(CleanedUpload::export_name)
            .unwrap_or_default();
        if let Some(first) = claimed.get(&export_name) {
            let msg = format!(
                "{} would overwrite {} already written for {}",
                path.display(),
                export_name,
                first.display()
            );
            warn!(file = %path.display(), first = %first.display(), "export name collision");
            report.failed.push((path, msg));
            continue;
        }

        match state.export_to_dir(out_dir) {
            Ok(dest) => {
                claimed.insert(export_name, path.clone());
                report.exported.push((path, dest));
            }
            Err(e) => {
                error!(file = %path.display(), error = %e, "export failed");
                report.failed.push((path, e.to_string()));
            }
        }
    }

    info!(
        exported = report.exported.len(),
        failed = report.failed.len(),
        "batch finished"
    );
    Ok(report)
}
