// ============================================================
// SUMMARIZE USE CASE
// ============================================================
// Orchestrate ingestion, classification, view building and output

use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use crate::application::use_cases::column_classifier::aggregate;
use crate::application::use_cases::view_builder::ViewBuilder;
use crate::domain::error::{AppError, Result};
use crate::domain::summary::{
    ColumnSummary, SummaryConfig, SummaryOutcome, SummaryReport, TableSource,
};
use crate::infrastructure::source::{open_source, CsvReader, SourceKind};
use crate::infrastructure::workbook::{resolve_output_path, WorkbookWriter};

/// Summary use case
pub struct SummarizeUseCase {
    config: SummaryConfig,
}

impl SummarizeUseCase {
    pub fn new(config: SummaryConfig) -> Self {
        Self { config }
    }

    /// Summarize a file and write the workbook next to it (or to `output`)
    pub fn summarize_file(&self, input: &Path, output: Option<&Path>) -> Result<SummaryOutcome> {
        self.config.validate()?;

        if !input.is_file() {
            return Err(AppError::IoError(format!(
                "input file not found: {}",
                input.display()
            )));
        }

        let kind = SourceKind::from_path(input);
        let source = open_source(input, &self.config)?;
        let output_path = resolve_output_path(input, output, kind, &source.skipped_sheets);

        if !source.skipped_sheets.is_empty() {
            if output_path == input {
                warn!(
                    sheets = ?source.skipped_sheets,
                    "overwriting input; sheets other than the source sheet are not kept"
                );
            } else if output.is_none() {
                info!(
                    output = %output_path.display(),
                    "input has other sheets; writing the summary next to it"
                );
            }
        }

        let report = self.summarize_source(source)?;
        WorkbookWriter::new().write(&report.views, &output_path)?;

        Ok(SummaryOutcome {
            report,
            output_path,
        })
    }

    /// Summarize delimited text held in memory
    pub fn summarize_content(&self, content: &str) -> Result<SummaryReport> {
        let source = CsvReader::from_config(&self.config)?.read_content(content.to_string())?;
        self.summarize_source(source)
    }

    /// Run the single ingestion pass and derive all three views
    pub fn summarize_source(&self, source: TableSource) -> Result<SummaryReport> {
        self.config.validate()?;
        let start = Instant::now();

        let patterns = self.config.compile_patterns()?;
        let table = aggregate(source, self.config.ignore_set(), patterns)?;

        let classifications = table.profile.classify(self.config.category_threshold);
        let views = ViewBuilder::new(self.config.sample_count).build(&table, &classifications);

        let columns: Vec<ColumnSummary> = table
            .profile
            .columns
            .iter()
            .zip(classifications)
            .map(|(stats, classification)| ColumnSummary {
                header: stats.header.clone(),
                distinct_values: stats.distinct_count(),
                classification,
            })
            .collect();

        let processing_time = start.elapsed();
        info!(
            rows = table.profile.row_count,
            columns = columns.len(),
            elapsed_ms = processing_time.as_millis() as u64,
            "summarized table"
        );

        Ok(SummaryReport {
            views,
            columns,
            row_count: table.profile.row_count,
            processing_time_ms: processing_time.as_millis() as u64,
        })
    }
}

impl Default for SummarizeUseCase {
    fn default() -> Self {
        Self::new(SummaryConfig::default())
    }
}
