// ============================================================
// WORKBOOK WRITER
// ============================================================
// Render tabular views as styled xlsx worksheets

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::{debug, info};

use crate::domain::error::{AppError, Result};
use crate::domain::summary::{HeaderAxis, SummaryViews, TabularView};

/// Excel caps column widths at 255 characters
const MAX_COLUMN_WIDTH: usize = 255;

/// Writes summary views as a workbook, one worksheet per view
pub struct WorkbookWriter {
    header_format: Format,
}

impl Default for WorkbookWriter {
    fn default() -> Self {
        Self {
            header_format: Format::new().set_bold(),
        }
    }
}

impl WorkbookWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write all views, in order, to `path`, replacing any existing file
    pub fn write(&self, views: &SummaryViews, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();

        for view in views.sheets() {
            let sheet = self.render_sheet(view)?;
            workbook.push_worksheet(sheet);
        }

        workbook.save(path).map_err(|e| {
            AppError::WorkbookError(format!("Failed to save {}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), "workbook written");
        Ok(())
    }

    /// Bold headers, frozen header edge, columns sized to their longest value
    pub fn render_sheet(&self, view: &TabularView) -> Result<Worksheet> {
        let mut sheet = Worksheet::new();
        sheet.set_name(&view.name)?;

        for (r, row) in view.rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let row_idx = row_index(r)?;
                let col_idx = col_index(c)?;
                let is_header = match view.header_axis {
                    HeaderAxis::Row => r == 0,
                    HeaderAxis::Column => c == 0,
                };

                if is_header {
                    sheet.write_string_with_format(row_idx, col_idx, value, &self.header_format)?;
                } else if let Some(number) = as_number(value) {
                    sheet.write_number(row_idx, col_idx, number)?;
                } else {
                    sheet.write_string(row_idx, col_idx, value)?;
                }
            }
        }

        match view.header_axis {
            HeaderAxis::Row => sheet.set_freeze_panes(1, 0)?,
            HeaderAxis::Column => sheet.set_freeze_panes(0, 1)?,
        };

        for (c, width) in view.column_widths().into_iter().enumerate() {
            let width = width.clamp(1, MAX_COLUMN_WIDTH);
            sheet.set_column_width(col_index(c)?, width as f64)?;
        }

        debug!(sheet = %view.name, rows = view.rows.len(), "rendered worksheet");
        Ok(sheet)
    }
}

/// A value written as a number only when it reads back as the same text
fn as_number(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && n.to_string() == value)
}

fn row_index(row: usize) -> Result<u32> {
    u32::try_from(row)
        .map_err(|_| AppError::WorkbookError(format!("row {} exceeds worksheet limits", row)))
}

fn col_index(col: usize) -> Result<u16> {
    u16::try_from(col)
        .map_err(|_| AppError::WorkbookError(format!("column {} exceeds worksheet limits", col)))
}
