use crate::clean::REQUIRED_COLUMNS;
use crate::table::CleanedRecordSet;

/// Rows shown by default when previewing a cleaned file.
pub const PREVIEW_ROWS: usize = 5;

/// Render the header and the first `max_rows` records as a plain text table,
/// each column padded to its widest cell.
pub fn render_preview(set: &CleanedRecordSet, max_rows: usize) -> String {
    let rows: Vec<[String; 9]> = set.iter().take(max_rows).map(|r| r.cells()).collect();

    let mut widths: Vec<usize> = REQUIRED_COLUMNS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, REQUIRED_COLUMNS.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    if set.len() > rows.len() {
        out.push_str(&format!("... {} more row(s)\n", set.len() - rows.len()));
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}
