use thiserror::Error;

/// Everything that can stop a billing file from being cleaned or exported.
///
/// Every variant aborts the whole operation: a cleaned set is either produced
/// in full or not at all.
#[derive(Error, Debug)]
pub enum CleaningError {
    #[error(
        "the uploaded dataset is missing the following columns: {}",
        .missing.join(", ")
    )]
    MissingColumns { missing: Vec<String> },

    #[error("row {row_index}: cannot parse date of service {raw_value:?} (expected MM/DD/YYYY HH:MM)")]
    DateParse { row_index: usize, raw_value: String },

    #[error("no file selected")]
    NoFileSelected,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CleaningError>;
