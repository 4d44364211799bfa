use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{Classification, SummaryViews};

/// Classification outcome for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub header: String,
    pub distinct_values: usize,
    pub classification: Classification,
}

/// Result of summarizing one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Data, Summary and Samples views, in output order
    pub views: SummaryViews,

    /// Per-column classification, in column order
    pub columns: Vec<ColumnSummary>,

    /// Number of data rows ingested
    pub row_count: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Where a summary run wrote its workbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutcome {
    pub report: SummaryReport,
    pub output_path: PathBuf,
}
