// src/table/mod.rs
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Serialize, Serializer};
use std::{
    fs::File,
    io::{BufReader, Read, Write},
    path::Path,
};
use tracing::{debug, trace};

use crate::clean::REQUIRED_COLUMNS;
use crate::error::Result;

/// Layout used when writing the parsed date of service back out.
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A CSV file as uploaded: header names plus text rows, nothing interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecordSet {
    /// Column names from the header row, in file order.
    pub headers: Vec<String>,
    /// One entry per data row, positionally aligned with `headers`.
    /// Rows may be shorter than the header; missing trailing values read as "".
    pub rows: Vec<Vec<String>>,
}

impl RawRecordSet {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Position of `name` in the header, exact match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Value at `idx` in `row`, or "" when the row is too short.
pub fn field(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// One billing line restricted to the required columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanedRecord {
    #[serde(rename = "Provider Name")]
    pub provider_name: String,
    #[serde(rename = "Patient Name")]
    pub patient_name: String,
    #[serde(rename = "Patient DOB")]
    pub patient_dob: String,
    #[serde(rename = "Facility Name")]
    pub facility_name: String,
    #[serde(rename = "Place of Service")]
    pub place_of_service: String,
    #[serde(rename = "ICD10")]
    pub icd10: String,
    #[serde(rename = "CPT")]
    pub cpt: String,
    #[serde(rename = "Modifiers")]
    pub modifiers: String,
    #[serde(
        rename = "Date of Service (Facility Timezone)",
        serialize_with = "serialize_service_date"
    )]
    pub date_of_service: NaiveDateTime,
}

impl CleanedRecord {
    /// Cell texts in `REQUIRED_COLUMNS` order, as they are written to CSV.
    pub fn cells(&self) -> [String; 9] {
        [
            self.provider_name.clone(),
            self.patient_name.clone(),
            self.patient_dob.clone(),
            self.facility_name.clone(),
            self.place_of_service.clone(),
            self.icd10.clone(),
            self.cpt.clone(),
            self.modifiers.clone(),
            self.date_of_service.format(OUTPUT_DATE_FORMAT).to_string(),
        ]
    }
}

fn serialize_service_date<S: Serializer>(
    dt: &NaiveDateTime,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&dt.format(OUTPUT_DATE_FORMAT))
}

/// Output of a successful clean: required columns only, sorted by date of service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedRecordSet {
    pub records: Vec<CleanedRecord>,
}

impl CleanedRecordSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CleanedRecord> {
        self.records.iter()
    }

    /// Header names of the cleaned set; always the required columns.
    pub fn columns(&self) -> &'static [&'static str] {
        &REQUIRED_COLUMNS
    }
}

/// Parse CSV text (header row first) into a `RawRecordSet`.
pub fn read_raw_csv<R: Read>(reader: R) -> Result<RawRecordSet> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // short/long rows are tolerated, missing values read as ""
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        trace!(row = idx, fields = record.len(), "read record");
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(columns = headers.len(), rows = rows.len(), "parsed raw CSV");
    Ok(RawRecordSet { headers, rows })
}

/// Open `path`, read it fully, and close it before returning.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_raw_path<P: AsRef<Path>>(path: P) -> Result<RawRecordSet> {
    let file = File::open(path.as_ref())?;
    read_raw_csv(BufReader::new(file))
}

/// Write `set` as CSV: the required-column header, then one line per record.
/// The header is written even when the set is empty.
pub fn write_cleaned_csv<W: Write>(set: &CleanedRecordSet, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(REQUIRED_COLUMNS)?;
    for record in set.iter() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
