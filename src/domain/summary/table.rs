// ============================================================
// TABLE TYPES
// ============================================================
// Row sources coming in and tabular views going out

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;

/// One data row, aligned by position to the headers
pub type Row = Vec<String>;

/// Lazily produced rows; each item may fail independently
pub type RowIter = Box<dyn Iterator<Item = Result<Row>>>;

/// Uniform shape produced by every ingestion adapter
pub struct TableSource {
    /// Name the data view is written under
    pub name: String,

    /// Column names from the first record
    pub headers: Vec<String>,

    /// Remaining records
    pub rows: RowIter,

    /// Expected number of data rows, when the adapter knows it up front
    pub row_count_hint: Option<usize>,

    /// Sheets of the source that are not part of the output
    pub skipped_sheets: Vec<String>,
}

impl TableSource {
    /// Build a source over rows that are already in memory
    pub fn from_rows(name: impl Into<String>, headers: Vec<String>, rows: Vec<Row>) -> Self {
        let row_count_hint = Some(rows.len());
        Self {
            name: name.into(),
            headers,
            rows: Box::new(rows.into_iter().map(Ok)),
            row_count_hint,
            skipped_sheets: Vec::new(),
        }
    }
}

/// Which edge of a view holds the header labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderAxis {
    /// First row holds the headers
    Row,
    /// First column holds the headers
    Column,
}

/// A plain grid of strings with a sheet name, ready for a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularView {
    pub name: String,
    pub header_axis: HeaderAxis,
    pub rows: Vec<Vec<String>>,
}

impl TabularView {
    pub fn new(name: impl Into<String>, header_axis: HeaderAxis, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            header_axis,
            rows,
        }
    }

    /// Cell text, or "" outside the grid
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Longest cell per column, in characters
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0usize; self.column_count()];
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                widths[idx] = widths[idx].max(cell.chars().count());
            }
        }
        widths
    }
}

/// The three views of a summary run, in output order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryViews {
    pub data: TabularView,
    pub summary: TabularView,
    pub samples: TabularView,
}

impl SummaryViews {
    pub fn sheets(&self) -> [&TabularView; 3] {
        [&self.data, &self.summary, &self.samples]
    }
}
