/// Maximum number of diagnosis codes kept per record.
pub const MAX_ICD10_CODES: usize = 6;

/// Keep the first [`MAX_ICD10_CODES`] comma-separated codes, trimmed and
/// rejoined with `", "`. An empty field stays empty.
pub fn truncate_codes(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    raw.split(',')
        .take(MAX_ICD10_CODES)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(", ")
}
