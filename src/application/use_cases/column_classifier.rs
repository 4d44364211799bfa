// ============================================================
// COLUMN CLASSIFIER
// ============================================================
// Single-pass aggregation of column values into frequency tables

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::domain::error::Result;
use crate::domain::summary::{Classification, ColumnStats, CompiledPatterns, Row, TableSource};

/// Aggregates rows one at a time, keyed by column position
pub struct ColumnAggregator {
    patterns: CompiledPatterns,
    ignore: HashSet<String>,
    columns: Vec<ColumnStats>,
    row_count: usize,
}

impl ColumnAggregator {
    pub fn new(headers: &[String], ignore: HashSet<String>, patterns: CompiledPatterns) -> Self {
        Self {
            patterns,
            ignore,
            columns: headers.iter().map(ColumnStats::new).collect(),
            row_count: 0,
        }
    }

    /// Fold one row into the column statistics and return it with ignored values blanked
    pub fn observe_row(&mut self, row: Row) -> Row {
        let cleaned = row
            .into_iter()
            .enumerate()
            .map(|(idx, value)| {
                if self.ignore.contains(&value) {
                    return String::new();
                }
                if let Some(stats) = self.columns.get_mut(idx) {
                    stats.observe(&value, &self.patterns);
                }
                value
            })
            .collect();

        self.row_count += 1;
        cleaned
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn finish(self) -> ColumnProfile {
        ColumnProfile {
            columns: self.columns,
            row_count: self.row_count,
        }
    }
}

/// Finalized statistics for every column
#[derive(Debug, Clone)]
pub struct ColumnProfile {
    pub columns: Vec<ColumnStats>,
    pub row_count: usize,
}

impl ColumnProfile {
    /// Classify every column, in column order
    pub fn classify(&self, category_threshold: usize) -> Vec<Classification> {
        self.columns
            .iter()
            .map(|stats| {
                let classification = stats.classify(self.row_count, category_threshold);
                debug!(
                    column = %stats.header,
                    distinct = stats.distinct_count(),
                    classification = %classification,
                    "classified column"
                );
                classification
            })
            .collect()
    }
}

/// Everything the view builder needs after the ingestion pass
#[derive(Debug, Clone)]
pub struct AggregatedTable {
    /// Name for the data view
    pub name: String,
    pub headers: Vec<String>,
    /// Every row with ignored values blanked
    pub rows: Vec<Row>,
    pub profile: ColumnProfile,
}

/// Drain a source through a fresh aggregator, caching the cleaned rows
pub fn aggregate(
    source: TableSource,
    ignore: HashSet<String>,
    patterns: CompiledPatterns,
) -> Result<AggregatedTable> {
    let TableSource {
        name,
        headers,
        rows,
        row_count_hint,
        ..
    } = source;

    warn_duplicate_headers(&headers);

    let mut aggregator = ColumnAggregator::new(&headers, ignore, patterns);
    let mut cache = Vec::with_capacity(row_count_hint.unwrap_or(0));

    for row in rows {
        cache.push(aggregator.observe_row(row?));
    }
    debug!(rows = aggregator.row_count(), "ingestion pass complete");

    Ok(AggregatedTable {
        name,
        headers,
        rows: cache,
        profile: aggregator.finish(),
    })
}

/// Duplicate names stay separate columns; flag them so the output is not a surprise
fn warn_duplicate_headers(headers: &[String]) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for header in headers {
        *seen.entry(header.as_str()).or_insert(0) += 1;
    }

    let mut duplicates: Vec<&str> = seen
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect();

    if !duplicates.is_empty() {
        duplicates.sort_unstable();
        warn!(
            headers = ?duplicates,
            "duplicate header names; each column is summarized separately"
        );
    }
}
