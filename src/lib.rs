pub mod clean;
pub mod cli;
pub mod error;
pub mod export;
pub mod preview;
pub mod session;
pub mod table;

pub use clean::{clean, REQUIRED_COLUMNS};
pub use error::CleaningError;
pub use table::{CleanedRecord, CleanedRecordSet, RawRecordSet};
