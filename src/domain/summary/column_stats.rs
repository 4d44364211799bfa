// ============================================================
// COLUMN STATISTICS
// ============================================================
// Per-column value frequencies and date heuristics

use std::collections::HashMap;

use super::{Classification, CompiledPatterns, ValueCount};

/// Accumulated statistics for a single column
#[derive(Debug, Clone)]
pub struct ColumnStats {
    /// Header name of the column
    pub header: String,

    /// Occurrence count per distinct non-ignored value
    pub counts: HashMap<String, usize>,

    /// Every observed value fully matched the date pattern
    pub all_dates: bool,

    /// Every observed value fully matched the date/time pattern
    pub all_date_times: bool,
}

impl ColumnStats {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            counts: HashMap::new(),
            all_dates: true,
            all_date_times: true,
        }
    }

    /// Record one non-ignored value. The date flags only ever go from true to false.
    pub fn observe(&mut self, value: &str, patterns: &CompiledPatterns) {
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_string(), 1);
            }
        }
        self.all_dates = self.all_dates && patterns.is_date(value);
        self.all_date_times = self.all_date_times && patterns.is_date_time(value);
    }

    pub fn distinct_count(&self) -> usize {
        self.counts.len()
    }

    pub fn has_values(&self) -> bool {
        !self.counts.is_empty()
    }

    /// Values ranked by count descending, ties broken by value descending
    pub fn ranked_values(&self) -> Vec<ValueCount> {
        let mut ranked: Vec<ValueCount> = self
            .counts
            .iter()
            .map(|(value, count)| ValueCount::new(value.clone(), *count))
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| b.value.cmp(&a.value)));
        ranked
    }

    /// Derive the column classification; the first matching rule wins
    pub fn classify(&self, row_count: usize, category_threshold: usize) -> Classification {
        if !self.has_values() {
            Classification::Unclassified
        } else if self.distinct_count() == row_count {
            Classification::Unique
        } else if self.all_date_times {
            Classification::DateTimes
        } else if self.all_dates {
            Classification::Dates
        } else if self.distinct_count() <= category_threshold {
            Classification::Categorical(self.ranked_values())
        } else {
            Classification::Unclassified
        }
    }
}
