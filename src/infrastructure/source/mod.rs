// ============================================================
// SOURCE INFRASTRUCTURE LAYER
// ============================================================
// Format detection and ingestion adapters for text and spreadsheets

mod csv_reader;
mod sheet_reader;

use std::path::Path;

use tracing::info;

use crate::domain::error::Result;
use crate::domain::summary::{SummaryConfig, TableSource};

pub use csv_reader::{detect_delimiter, CsvReader, TEXT_DATA_SHEET};
pub use sheet_reader::{cell_to_string, range_to_rows, SheetReader};

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Input format, decided by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    DelimitedText,
    Spreadsheet,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Self {
        let is_spreadsheet = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                SPREADSHEET_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false);

        if is_spreadsheet {
            SourceKind::Spreadsheet
        } else {
            SourceKind::DelimitedText
        }
    }
}

/// Open the input with the adapter matching its format
pub fn open_source(path: &Path, config: &SummaryConfig) -> Result<TableSource> {
    let kind = SourceKind::from_path(path);
    info!(path = %path.display(), kind = ?kind, "opening source");

    match kind {
        SourceKind::DelimitedText => CsvReader::from_config(config)?.read_file(path),
        SourceKind::Spreadsheet => SheetReader::new(config.sheet_name.clone()).read_file(path),
    }
}
