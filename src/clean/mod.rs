// src/clean/mod.rs
pub mod date_parser;
pub mod icd10;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::error::{CleaningError, Result};
use crate::table::{field, CleanedRecord, CleanedRecordSet, RawRecordSet};

pub use date_parser::parse_service_date;
pub use icd10::{truncate_codes, MAX_ICD10_CODES};

pub const PROVIDER_NAME: &str = "Provider Name";
pub const PATIENT_NAME: &str = "Patient Name";
pub const PATIENT_DOB: &str = "Patient DOB";
pub const FACILITY_NAME: &str = "Facility Name";
pub const PLACE_OF_SERVICE: &str = "Place of Service";
pub const ICD10: &str = "ICD10";
pub const CPT: &str = "CPT";
pub const MODIFIERS: &str = "Modifiers";
pub const DATE_OF_SERVICE: &str = "Date of Service (Facility Timezone)";

/// The output schema. Every uploaded file must carry all of these columns.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    PROVIDER_NAME,
    PATIENT_NAME,
    PATIENT_DOB,
    FACILITY_NAME,
    PLACE_OF_SERVICE,
    ICD10,
    CPT,
    MODIFIERS,
    DATE_OF_SERVICE,
];

/// Required columns that `raw` lacks, in `REQUIRED_COLUMNS` order.
pub fn missing_columns(raw: &RawRecordSet) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|name| raw.column_index(name).is_none())
        .map(|name| name.to_string())
        .collect()
}

/// Clean an uploaded billing table.
///
/// 1) fail if any required column is missing (extra columns are dropped)
/// 2) project each row onto `REQUIRED_COLUMNS`
/// 3) parse the date of service; the first bad value aborts the whole clean
/// 4) keep at most [`MAX_ICD10_CODES`] diagnosis codes per row
/// 5) stable-sort by date of service
#[tracing::instrument(level = "debug", skip(raw), fields(rows = raw.len(), columns = raw.headers.len()))]
pub fn clean(raw: RawRecordSet) -> Result<CleanedRecordSet> {
    let missing = missing_columns(&raw);
    if !missing.is_empty() {
        return Err(CleaningError::MissingColumns { missing });
    }

    // All present, so every lookup below succeeds.
    let [provider, patient, dob, facility, pos, icd10, cpt, modifiers, date] =
        REQUIRED_COLUMNS.map(|name| raw.column_index(name).unwrap_or_default());
    let dropped = raw.headers.len().saturating_sub(REQUIRED_COLUMNS.len());
    if dropped > 0 {
        debug!(dropped, "ignoring columns outside the required set");
    }

    let mut records = Vec::with_capacity(raw.rows.len());
    for (row_index, row) in raw.rows.iter().enumerate() {
        let raw_date = field(row, date);
        let date_of_service: NaiveDateTime =
            parse_service_date(raw_date).ok_or_else(|| CleaningError::DateParse {
                row_index,
                raw_value: raw_date.to_string(),
            })?;

        records.push(CleanedRecord {
            provider_name: field(row, provider).to_string(),
            patient_name: field(row, patient).to_string(),
            patient_dob: field(row, dob).to_string(),
            facility_name: field(row, facility).to_string(),
            place_of_service: field(row, pos).to_string(),
            icd10: truncate_codes(field(row, icd10)),
            cpt: field(row, cpt).to_string(),
            modifiers: field(row, modifiers).to_string(),
            date_of_service,
        });
    }

    // `sort_by_key` is stable: rows sharing a timestamp keep upload order.
    records.sort_by_key(|r| r.date_of_service);

    info!(rows = records.len(), "cleaned billing records");
    Ok(CleanedRecordSet { records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::read_raw_csv;

    const HEADER: &str = "Provider Name,Patient Name,Patient DOB,Facility Name,Place of Service,ICD10,CPT,Modifiers,Date of Service (Facility Timezone)";

    fn raw_from(text: &str) -> RawRecordSet {
        read_raw_csv(text.as_bytes()).expect("valid test CSV")
    }

    #[test]
    fn missing_cpt_is_reported_alone() {
        let header = HEADER.replace(",CPT", "");
        let raw = raw_from(&format!("{header}\nP,N,D,F,11,A,25,01/01/2024 09:00\n"));
        match clean(raw) {
            Err(CleaningError::MissingColumns { missing }) => assert_eq!(missing, vec!["CPT"]),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn missing_columns_keep_required_order() {
        let raw = raw_from("Date of Service (Facility Timezone),Provider Name\n");
        let missing = missing_columns(&raw);
        assert_eq!(
            missing,
            vec![
                "Patient Name",
                "Patient DOB",
                "Facility Name",
                "Place of Service",
                "ICD10",
                "CPT",
                "Modifiers"
            ]
        );
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let header = HEADER.replace("ICD10", "icd10");
        let raw = raw_from(&format!("{header}\n"));
        assert!(matches!(
            clean(raw),
            Err(CleaningError::MissingColumns { missing }) if missing == vec!["ICD10"]
        ));
    }

    #[test]
    fn bad_date_aborts_with_row_and_value() {
        let raw = raw_from(&format!(
            "{HEADER}\nP,N,D,F,11,A,1,,01/01/2024 09:00\nP,N,D,F,11,A,1,,13/40/2023 99:99\n"
        ));
        match clean(raw) {
            Err(CleaningError::DateParse {
                row_index,
                raw_value,
            }) => {
                assert_eq!(row_index, 1);
                assert_eq!(raw_value, "13/40/2023 99:99");
            }
            other => panic!("expected DateParse, got {other:?}"),
        }
    }

    #[test]
    fn absent_date_is_a_parse_error() {
        let raw = raw_from(&format!("{HEADER}\nP,N,D,F,11,A,1\n"));
        assert!(matches!(
            clean(raw),
            Err(CleaningError::DateParse { row_index: 0, raw_value }) if raw_value.is_empty()
        ));
    }

    #[test]
    fn sorts_by_date_and_truncates_codes() -> anyhow::Result<()> {
        let raw = raw_from(&format!(
            "{HEADER}\n\
             P1,N1,D1,F1,11,\"A,B,C,D,E,F,G\",99213,,02/01/2024 10:00\n\
             P2,N2,D2,F2,22,\"A,B,C,D,E,F,G\",99214,25,01/01/2024 09:00\n"
        ));
        let cleaned = clean(raw)?;
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned.records[0].provider_name, "P2");
        assert_eq!(cleaned.records[1].provider_name, "P1");
        for r in cleaned.iter() {
            assert_eq!(r.icd10, "A, B, C, D, E, F");
        }
        Ok(())
    }

    #[test]
    fn extra_columns_and_column_order_are_ignored() -> anyhow::Result<()> {
        let raw = raw_from(
            "Claim ID,Date of Service (Facility Timezone),CPT,ICD10,Modifiers,Place of Service,Facility Name,Patient DOB,Patient Name,Provider Name\n\
             C-1,3/4/2024 8:30,99213,Z00.0,,11,Clinic,01/02/1970,Pat,Doc\n",
        );
        let cleaned = clean(raw)?;
        let r = &cleaned.records[0];
        assert_eq!(r.provider_name, "Doc");
        assert_eq!(r.patient_name, "Pat");
        assert_eq!(r.cpt, "99213");
        assert_eq!(r.icd10, "Z00.0");
        assert_eq!(cleaned.columns(), &REQUIRED_COLUMNS);
        Ok(())
    }

    #[test]
    fn equal_dates_keep_input_order() -> anyhow::Result<()> {
        let raw = raw_from(&format!(
            "{HEADER}\n\
             first,N,D,F,11,A,1,,05/05/2024 12:00\n\
             early,N,D,F,11,A,1,,05/04/2024 12:00\n\
             second,N,D,F,11,A,1,,5/5/2024 12:00\n\
             third,N,D,F,11,A,1,,05/05/2024 12:00\n"
        ));
        let names: Vec<String> = clean(raw)?
            .records
            .into_iter()
            .map(|r| r.provider_name)
            .collect();
        assert_eq!(names, vec!["early", "first", "second", "third"]);
        Ok(())
    }

    #[test]
    fn empty_icd10_is_not_an_error() -> anyhow::Result<()> {
        let raw = raw_from(&format!("{HEADER}\nP,N,D,F,11,,1,,01/01/2024 09:00\n"));
        assert_eq!(clean(raw)?.records[0].icd10, "");
        Ok(())
    }

    #[test]
    fn header_only_input_yields_empty_set() -> anyhow::Result<()> {
        let cleaned = clean(raw_from(&format!("{HEADER}\n")))?;
        assert!(cleaned.is_empty());
        Ok(())
    }
}
