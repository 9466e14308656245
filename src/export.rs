use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::error::{CleaningError, Result};
use crate::table::{write_cleaned_csv, CleanedRecordSet};

/// `Filtered_<base>.csv`, where `<base>` is the file name up to its first `.`.
///
/// Any directory part of `original` is ignored.
pub fn default_export_name(original: &str) -> String {
    let file_name = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(original);
    let base = file_name.split('.').next().unwrap_or(file_name);
    format!("Filtered_{}.csv", base)
}

/// Write `set` to `path`.
///
/// The CSV goes to a hidden sibling first and is renamed over `path` once
/// fully flushed, so a failed export leaves no partial file behind.
#[tracing::instrument(level = "info", skip(set, path), fields(path = %path.as_ref().display(), rows = set.len()))]
pub fn export_to_path<P: AsRef<Path>>(set: &CleanedRecordSet, path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export.csv".to_string());
    let tmp_path = match dir {
        Some(d) => d.join(format!(".{}.tmp", file_name)),
        None => PathBuf::from(format!(".{}.tmp", file_name)),
    };

    let written = File::create(&tmp_path)
        .map_err(CleaningError::from)
        .and_then(|f| write_cleaned_csv(set, BufWriter::new(f)));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    debug!(tmp = %tmp_path.display(), "wrote temporary export");

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    info!("exported cleaned CSV");
    Ok(path.to_path_buf())
}

/// Create `dir` if needed and export under the default name derived from
/// `original_name`.
pub fn export_to_dir<P: AsRef<Path>>(
    set: &CleanedRecordSet,
    dir: P,
    original_name: &str,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    export_to_path(set, dir.join(default_export_name(original_name)))
}
