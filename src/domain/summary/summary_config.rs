// ============================================================
// SUMMARY CONFIGURATION
// ============================================================
// Options controlling ingestion, classification and sampling

use std::collections::HashSet;

use encoding_rs::Encoding;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};

pub const DEFAULT_DATE_PATTERN: &str = r"\d{2}[-/]\d{2}[-/]\d{4}";
pub const DEFAULT_DATE_TIME_PATTERN: &str =
    r"\d{2}[-/]\d{2}[-/]\d{4}[- ]\d{2}:\d{2}:\d{2}(\.\d{1,6})?";

/// `delimiter` value that turns on delimiter sniffing
pub const AUTO_DELIMITER: &str = "auto";

/// Largest sample count that still fits a worksheet next to the header column
pub const MAX_SAMPLE_COUNT: usize = 16_383;

/// Configuration for a summary run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SummaryConfig {
    /// Columns with at most this many distinct values are summarized as categories (default: 100)
    #[validate(range(min = 1))]
    pub category_threshold: usize,

    /// Full-match pattern for date-only values
    #[validate(length(min = 1))]
    pub date_pattern: String,

    /// Full-match pattern for date-with-time values
    #[validate(length(min = 1))]
    pub date_time_pattern: String,

    /// Values treated as blanks, such as "?" or "N/A"
    pub ignore_values: Vec<String>,

    /// Treat empty cells like ignored values instead of counting "" as a value
    pub ignore_blanks: bool,

    /// Number of leading rows shown in the transposed sample view (default: 3)
    #[validate(range(max = 16383))]
    pub sample_count: usize,

    /// Sheet to read from spreadsheet input; the first sheet when unset
    pub sheet_name: Option<String>,

    /// Single-character field delimiter for text input, or "auto" to sniff it
    #[validate(length(min = 1))]
    pub delimiter: String,

    /// Encoding label for text input (WHATWG names, e.g. "utf-8", "windows-1252")
    #[validate(length(min = 1))]
    pub encoding: String,

    /// Reject text rows whose field count differs from the header count
    pub strict_rows: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            category_threshold: 100,
            date_pattern: DEFAULT_DATE_PATTERN.to_string(),
            date_time_pattern: DEFAULT_DATE_TIME_PATTERN.to_string(),
            ignore_values: Vec::new(),
            ignore_blanks: true,
            sample_count: 3,
            sheet_name: None,
            delimiter: ",".to_string(),
            encoding: "utf-8".to_string(),
            strict_rows: true,
        }
    }
}

/// Parsed form of the `delimiter` option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterChoice {
    Fixed(u8),
    Auto,
}

/// Date heuristics compiled once, before any row is read
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    pub date: Regex,
    pub date_time: Regex,
}

impl CompiledPatterns {
    pub fn is_date(&self, value: &str) -> bool {
        self.date.is_match(value)
    }

    pub fn is_date_time(&self, value: &str) -> bool {
        self.date_time.is_match(value)
    }
}

impl SummaryConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values, including the regular expressions
    pub fn validate(&self) -> Result<()> {
        <Self as Validate>::validate(self)?;
        self.delimiter_choice()?;
        self.text_encoding()?;
        self.compile_patterns()?;
        Ok(())
    }

    /// Compile both date heuristics with full-match anchoring
    pub fn compile_patterns(&self) -> Result<CompiledPatterns> {
        Ok(CompiledPatterns {
            date: compile_full_match("date_pattern", &self.date_pattern)?,
            date_time: compile_full_match("date_time_pattern", &self.date_time_pattern)?,
        })
    }

    pub fn ignore_set(&self) -> HashSet<String> {
        let mut set: HashSet<String> = self.ignore_values.iter().cloned().collect();
        if self.ignore_blanks {
            set.insert(String::new());
        }
        set
    }

    pub fn delimiter_choice(&self) -> Result<DelimiterChoice> {
        if self.delimiter.eq_ignore_ascii_case(AUTO_DELIMITER) {
            return Ok(DelimiterChoice::Auto);
        }
        // Tab is commonly passed as the two characters `\t`
        if self.delimiter == "\\t" {
            return Ok(DelimiterChoice::Fixed(b'\t'));
        }
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(DelimiterChoice::Fixed(*byte)),
            _ => Err(AppError::ConfigError(format!(
                "delimiter must be a single ASCII character or '{}', got '{}'",
                AUTO_DELIMITER, self.delimiter
            ))),
        }
    }

    pub fn text_encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.encoding.trim().as_bytes()).ok_or_else(|| {
            AppError::ConfigError(format!("unknown text encoding '{}'", self.encoding))
        })
    }
}

fn compile_full_match(option: &str, pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| AppError::InvalidPattern {
        option: option.to_string(),
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}
