// ============================================================
// VIEW BUILDER
// ============================================================
// Cleaned data, summary and transposed sample views

use crate::application::use_cases::column_classifier::AggregatedTable;
use crate::domain::summary::{Classification, HeaderAxis, SummaryViews, TabularView};

pub const SUMMARY_SHEET: &str = "Summary";
pub const SAMPLES_SHEET: &str = "Samples";

/// Builds the output views from an aggregated table
pub struct ViewBuilder {
    sample_count: usize,
}

impl ViewBuilder {
    pub fn new(sample_count: usize) -> Self {
        Self { sample_count }
    }

    pub fn build(&self, table: &AggregatedTable, classifications: &[Classification]) -> SummaryViews {
        SummaryViews {
            data: self.data_view(table),
            summary: self.summary_view(&table.headers, classifications),
            samples: self.sample_view(table),
        }
    }

    /// Headers followed by every cleaned row
    pub fn data_view(&self, table: &AggregatedTable) -> TabularView {
        let mut rows = Vec::with_capacity(table.rows.len() + 1);
        rows.push(table.headers.clone());
        rows.extend(table.rows.iter().cloned());

        TabularView::new(table.name.clone(), HeaderAxis::Row, rows)
    }

    /// Headers, then each column's summary cells stacked underneath
    pub fn summary_view(&self, headers: &[String], classifications: &[Classification]) -> TabularView {
        let columns: Vec<Vec<String>> = classifications.iter().map(|c| c.summary_cells()).collect();
        let depth = columns.iter().map(Vec::len).max().unwrap_or(0);

        let mut rows = Vec::with_capacity(depth + 1);
        rows.push(headers.to_vec());
        for level in 0..depth {
            let row = (0..headers.len())
                .map(|col| {
                    columns
                        .get(col)
                        .and_then(|cells| cells.get(level))
                        .cloned()
                        .unwrap_or_default()
                })
                .collect();
            rows.push(row);
        }

        TabularView::new(SUMMARY_SHEET, HeaderAxis::Row, rows)
    }

    /// One row per column: the header, then values from the first `sample_count` rows
    pub fn sample_view(&self, table: &AggregatedTable) -> TabularView {
        let rows = table
            .headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                let mut row = Vec::with_capacity(self.sample_count.saturating_add(1));
                row.push(header.clone());
                row.extend((0..self.sample_count).map(|sample| {
                    table
                        .rows
                        .get(sample)
                        .and_then(|r| r.get(col))
                        .cloned()
                        .unwrap_or_default()
                }));
                row
            })
            .collect();

        TabularView::new(SAMPLES_SHEET, HeaderAxis::Column, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::column_classifier::aggregate;
    use crate::domain::summary::{SummaryConfig, TableSource};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn table(headers: &[&str], rows: &[&[&str]], ignore: &[&str]) -> AggregatedTable {
        let source = TableSource::from_rows(
            "Data",
            strings(headers),
            rows.iter().map(|r| strings(r)).collect(),
        );
        let patterns = SummaryConfig::default().compile_patterns().unwrap();
        aggregate(source, ignore.iter().map(|v| v.to_string()).collect(), patterns).unwrap()
    }

    #[test]
    fn test_data_view_blanks_ignored_values() {
        let table = table(&["a", "b"], &[&["N/A", "1"], &["x", "N/A"]], &["N/A"]);
        let view = ViewBuilder::new(3).data_view(&table);

        assert_eq!(view.name, "Data");
        assert_eq!(view.header_axis, HeaderAxis::Row);
        assert_eq!(
            view.rows,
            vec![strings(&["a", "b"]), strings(&["", "1"]), strings(&["x", ""])]
        );
    }

    #[test]
    fn test_summary_view_layout() {
        let table = table(
            &["id", "status", "when", "note"],
            &[
                &["1", "active", "01/02/2020 10:00:00", "-"],
                &["2", "active", "01/02/2020 10:00:00", "-"],
                &["3", "inactive", "02/02/2020 11:30:00", "-"],
            ],
            &["-"],
        );
        let classes = table.profile.classify(100);
        let view = ViewBuilder::new(3).summary_view(&table.headers, &classes);

        assert_eq!(view.name, "Summary");
        assert_eq!(
            view.rows,
            vec![
                strings(&["id", "status", "when", "note"]),
                strings(&["Unique", "active [2]", "Date/Times", ""]),
                strings(&["", "inactive [1]", "", ""]),
            ]
        );
    }

    #[test]
    fn test_summary_view_without_cells_is_headers_only() {
        let view = ViewBuilder::new(3).summary_view(
            &strings(&["a"]),
            &[Classification::Unclassified],
        );
        assert_eq!(view.rows, vec![strings(&["a"])]);
    }

    #[test]
    fn test_sample_view_transposes_and_pads() {
        let table = table(&["id", "name"], &[&["1", "Ann"], &["2", "?"]], &["?"]);
        let view = ViewBuilder::new(3).sample_view(&table);

        assert_eq!(view.name, "Samples");
        assert_eq!(view.header_axis, HeaderAxis::Column);
        assert_eq!(
            view.rows,
            vec![strings(&["id", "1", "2", ""]), strings(&["name", "Ann", "", ""])]
        );
    }

    #[test]
    fn test_sample_view_matches_data_view() {
        let table = table(
            &["a", "b", "c"],
            &[&["1", "2", "3"], &["4", "5", "6"], &["7", "8", "9"], &["x", "y", "z"]],
            &["5"],
        );
        let builder = ViewBuilder::new(2);
        let data = builder.data_view(&table);
        let samples = builder.sample_view(&table);

        for col in 0..3 {
            for sample in 0..2 {
                assert_eq!(samples.cell(col, sample + 1), data.cell(sample + 1, col));
            }
            assert_eq!(samples.rows[col].len(), 3);
        }
    }

    #[test]
    fn test_zero_samples() {
        let table = table(&["a"], &[&["1"]], &[]);
        let view = ViewBuilder::new(0).sample_view(&table);
        assert_eq!(view.rows, vec![strings(&["a"])]);
    }
}
