use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use chrono::{NaiveDateTime, Timelike};
use tracing::{debug, info};

use crate::domain::error::{AppError, Result};
use crate::domain::summary::{Row, TableSource};

/// Spreadsheet reader (xlsx, xlsm, xlsb, xls, ods)
#[derive(Debug, Clone, Default)]
pub struct SheetReader {
    /// Sheet to read; the first sheet when unset
    sheet_name: Option<String>,
}

impl SheetReader {
    pub fn new(sheet_name: Option<String>) -> Self {
        Self { sheet_name }
    }

    pub fn read_file(&self, path: &Path) -> Result<TableSource> {
        let mut workbook = open_workbook_auto(path).map_err(|e| {
            AppError::SpreadsheetError(format!(
                "Failed to open spreadsheet {}: {}",
                path.display(),
                e
            ))
        })?;

        let sheet_names = workbook.sheet_names().to_vec();
        let target = self.select_sheet(&sheet_names)?;
        info!(sheet = %target, sheets = sheet_names.len(), "reading spreadsheet");

        let range = workbook.worksheet_range(&target).map_err(|e| {
            AppError::SpreadsheetError(format!("Failed to read sheet '{}': {}", target, e))
        })?;

        let skipped_sheets = sheet_names
            .into_iter()
            .filter(|name| *name != target)
            .collect();

        let (headers, rows) = range_to_rows(&range);
        debug!(columns = headers.len(), rows = rows.len(), "spreadsheet range loaded");

        let mut source = TableSource::from_rows(target, headers, rows);
        source.skipped_sheets = skipped_sheets;
        Ok(source)
    }

    fn select_sheet(&self, sheet_names: &[String]) -> Result<String> {
        match &self.sheet_name {
            Some(name) if sheet_names.contains(name) => Ok(name.clone()),
            Some(name) => Err(AppError::SheetNotFound {
                sheet: name.clone(),
                available: sheet_names.to_vec(),
            }),
            None => sheet_names
                .first()
                .cloned()
                .ok_or_else(|| AppError::SpreadsheetError("Workbook has no sheets".to_string())),
        }
    }
}

/// Split a sheet range into a header row and stringified data rows
pub fn range_to_rows(range: &Range<Data>) -> (Vec<String>, Vec<Row>) {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Row>());

    let headers = rows.next().unwrap_or_default();
    (headers, rows.collect())
}

/// Render a cell the way it would read in a CSV export
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(format_datetime)
            .unwrap_or_else(|| cell.to_string()),
        _ => cell.to_string(),
    }
}

/// Midnight values print as plain dates so they classify as Dates
fn format_datetime(value: NaiveDateTime) -> String {
    let time = value.time();
    if time.num_seconds_from_midnight() == 0 && time.nanosecond() == 0 {
        value.format("%m/%d/%Y").to_string()
    } else {
        value.format("%m/%d/%Y %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("abc".to_string())), "abc");
        assert_eq!(cell_to_string(&Data::Int(42)), "42");
        assert_eq!(cell_to_string(&Data::Float(3.0)), "3");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }

    #[test]
    fn test_format_datetime() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        assert_eq!(
            format_datetime(date.and_hms_opt(0, 0, 0).unwrap()),
            "01/02/2020"
        );
        assert_eq!(
            format_datetime(date.and_hms_opt(13, 5, 9).unwrap()),
            "01/02/2020 13:05:09"
        );
    }

    #[test]
    fn test_select_sheet() {
        let names = vec!["Raw".to_string(), "Notes".to_string()];

        assert_eq!(SheetReader::new(None).select_sheet(&names).unwrap(), "Raw");
        assert_eq!(
            SheetReader::new(Some("Notes".to_string()))
                .select_sheet(&names)
                .unwrap(),
            "Notes"
        );

        match SheetReader::new(Some("Gone".to_string())).select_sheet(&names) {
            Err(AppError::SheetNotFound { sheet, available }) => {
                assert_eq!(sheet, "Gone");
                assert_eq!(available, names);
            }
            other => panic!("expected SheetNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_range_to_rows() {
        let mut range: Range<Data> = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("id".to_string()));
        range.set_value((0, 1), Data::String("score".to_string()));
        range.set_value((1, 0), Data::Int(1));
        range.set_value((1, 1), Data::Float(9.5));
        range.set_value((2, 0), Data::Int(2));

        let (headers, rows) = range_to_rows(&range);
        assert_eq!(headers, vec!["id", "score"]);
        assert_eq!(rows, vec![vec!["1", "9.5"], vec!["2", ""]]);
    }

    #[test]
    fn test_missing_file_is_spreadsheet_error() {
        let result = SheetReader::default().read_file(Path::new("/nonexistent/book.xlsx"));
        assert!(matches!(result, Err(AppError::SpreadsheetError(_))));
    }
}
