// ============================================================
// SUMMARY DOMAIN LAYER
// ============================================================
// Core types and value objects for column summaries
// No I/O, no logging

mod classification;
mod column_stats;
mod report;
mod summary_config;
mod table;

pub use classification::{Classification, ValueCount};
pub use column_stats::ColumnStats;
pub use report::{ColumnSummary, SummaryOutcome, SummaryReport};
pub use summary_config::{
    CompiledPatterns, DelimiterChoice, SummaryConfig, AUTO_DELIMITER, DEFAULT_DATE_PATTERN,
    DEFAULT_DATE_TIME_PATTERN, MAX_SAMPLE_COUNT,
};
pub use table::{HeaderAxis, Row, RowIter, SummaryViews, TableSource, TabularView};
