// ============================================================
// COLUMN CLASSIFICATION
// ============================================================
// Determines what the Summary view shows for a column

use serde::{Deserialize, Serialize};
use std::fmt;

/// A distinct value together with how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

impl ValueCount {
    pub fn new(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

impl fmt::Display for ValueCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.value, self.count)
    }
}

/// Classification derived for a column after ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Every row holds a different value
    Unique,

    /// Every observed value matches the date/time pattern
    DateTimes,

    /// Every observed value matches the date pattern
    Dates,

    /// Few enough distinct values to list them, ranked by frequency
    Categorical(Vec<ValueCount>),

    /// Too many distinct values, or nothing observed
    Unclassified,
}

impl Classification {
    /// Cells written under the column header in the Summary view
    pub fn summary_cells(&self) -> Vec<String> {
        match self {
            Classification::Unique => vec!["Unique".to_string()],
            Classification::DateTimes => vec!["Date/Times".to_string()],
            Classification::Dates => vec!["Dates".to_string()],
            Classification::Categorical(values) => {
                values.iter().map(|v| v.to_string()).collect()
            }
            Classification::Unclassified => Vec::new(),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Unique => write!(f, "Unique"),
            Classification::DateTimes => write!(f, "Date/Times"),
            Classification::Dates => write!(f, "Dates"),
            Classification::Categorical(values) => {
                write!(f, "Categorical ({} values)", values.len())
            }
            Classification::Unclassified => write!(f, "Unclassified"),
        }
    }
}
