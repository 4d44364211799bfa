use std::path::PathBuf;

use clap::{ArgAction, Parser};
use serde::Serialize;

/// Summarize a CSV file or spreadsheet into a Data/Summary/Samples workbook
#[derive(Debug, Parser)]
#[command(name = "csv-summary", version, about)]
pub struct Cli {
    /// Delimited text file or spreadsheet (xlsx, xlsm, xlsb, xls, ods)
    pub input: PathBuf,

    /// Output .xlsx path; defaults to the input with an .xlsx extension
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Columns with this many or fewer distinct values are listed with counts
    #[arg(long)]
    pub category_threshold: Option<usize>,

    /// Regular expression a value must fully match to count as a date
    #[arg(long)]
    pub date_pattern: Option<String>,

    /// Regular expression a value must fully match to count as a date/time
    #[arg(long, alias = "date-format")]
    pub date_time_pattern: Option<String>,

    /// Treat this value as blank (repeatable), e.g. -i '?' -i N/A
    #[arg(short = 'i', long = "ignore-value")]
    pub ignore_values: Vec<String>,

    /// Count empty cells as the value "" (by default empty cells are ignored like -i values)
    #[arg(long)]
    pub count_blanks: bool,

    /// Number of rows in the transposed Samples sheet
    #[arg(short = 's', long = "num-samples", alias = "sample-count")]
    pub sample_count: Option<usize>,

    /// Sheet to summarize in spreadsheet input
    #[arg(long = "sheet")]
    pub sheet_name: Option<String>,

    /// Field delimiter for text input, or "auto"
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Text encoding label, e.g. utf-8 or windows-1252
    #[arg(long)]
    pub encoding: Option<String>,

    /// Pad short rows and truncate long rows instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// TOML config file (default: ./csv-summary.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Config values given on the command line; unset fields leave lower layers alone
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_threshold: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time_pattern: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_blanks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_rows: Option<bool>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            category_threshold: self.category_threshold,
            date_pattern: self.date_pattern.clone(),
            date_time_pattern: self.date_time_pattern.clone(),
            ignore_values: self.ignore_values.clone(),
            ignore_blanks: self.count_blanks.then_some(false),
            sample_count: self.sample_count,
            sheet_name: self.sheet_name.clone(),
            delimiter: self.delimiter.clone(),
            encoding: self.encoding.clone(),
            strict_rows: self.lenient.then_some(false),
        }
    }

    /// Default log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
