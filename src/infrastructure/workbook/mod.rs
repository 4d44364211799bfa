// ============================================================
// WORKBOOK INFRASTRUCTURE LAYER
// ============================================================
// Output naming and xlsx rendering

mod writer;

use std::path::{Path, PathBuf};

use crate::infrastructure::source::SourceKind;

pub use writer::WorkbookWriter;

pub const WORKBOOK_EXTENSION: &str = "xlsx";

/// Appended to the file stem when an xlsx input holds sheets the output would drop
pub const SUMMARY_FILE_SUFFIX: &str = "-summary";

/// Pick the output file: explicit path, in-place for single-sheet xlsx input,
/// a `-summary` sibling for xlsx input with other sheets, otherwise the input renamed to .xlsx
pub fn resolve_output_path(
    input: &Path,
    explicit: Option<&Path>,
    kind: SourceKind,
    other_sheets: &[String],
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let is_xlsx = input
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(WORKBOOK_EXTENSION))
        .unwrap_or(false);

    match kind {
        SourceKind::Spreadsheet if is_xlsx && other_sheets.is_empty() => input.to_path_buf(),
        SourceKind::Spreadsheet if is_xlsx => summary_sibling(input),
        _ => input.with_extension(WORKBOOK_EXTENSION),
    }
}

fn summary_sibling(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!(
        "{}{}.{}",
        stem, SUMMARY_FILE_SUFFIX, WORKBOOK_EXTENSION
    ))
}
