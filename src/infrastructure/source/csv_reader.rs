// ============================================================
// CSV READER
// ============================================================
// Read delimited text with lossy decoding and row arity checks

use std::io::Cursor;
use std::path::Path;
use std::rc::Rc;

use csv::ReaderBuilder;
use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, warn};

use crate::domain::error::{AppError, Result};
use crate::domain::summary::{DelimiterChoice, Row, SummaryConfig, TableSource};

/// Sheet name used for the data view of text input
pub const TEXT_DATA_SHEET: &str = "Data";

/// Delimited text reader
pub struct CsvReader {
    /// Field delimiter, or sniff it from the content
    delimiter: DelimiterChoice,

    /// Encoding used to decode the raw bytes
    encoding: &'static Encoding,

    /// Fail on rows whose field count differs from the headers
    strict: bool,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self {
            delimiter: DelimiterChoice::Fixed(b','),
            encoding: UTF_8,
            strict: true,
        }
    }
}

impl CsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SummaryConfig) -> Result<Self> {
        Ok(Self {
            delimiter: config.delimiter_choice()?,
            encoding: config.text_encoding()?,
            strict: config.strict_rows,
        })
    }

    pub fn with_delimiter(mut self, delimiter: DelimiterChoice) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Read a delimited file from disk
    pub fn read_file(&self, path: &Path) -> Result<TableSource> {
        let bytes = std::fs::read(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "read delimited text");

        self.read_content(self.decode(&bytes))
    }

    /// Decode bytes, substituting U+FFFD for anything undecodable. A BOM overrides the encoding.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (text, used, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            warn!(
                encoding = used.name(),
                "input contained undecodable bytes; replaced with U+FFFD"
            );
        }
        text.into_owned()
    }

    /// Parse decoded content. The first record becomes the headers.
    pub fn read_content(&self, content: String) -> Result<TableSource> {
        let delimiter = match self.delimiter {
            DelimiterChoice::Fixed(byte) => byte,
            DelimiterChoice::Auto => {
                let detected = detect_delimiter(&content);
                let shown = (detected as char).escape_default().to_string();
                debug!(delimiter = %shown, "detected delimiter");
                detected
            }
        };

        let bytes: Rc<[u8]> = content.into_bytes().into();
        let reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(Cursor::new(Rc::clone(&bytes)));

        let mut records = reader.into_records();
        let headers: Vec<String> = match records.next() {
            Some(record) => record
                .map_err(|e| AppError::MalformedInput(format!("Failed to read headers: {}", e)))?
                .iter()
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };

        // The csv crate skips empty lines; they come back here as single empty-field rows
        let width = headers.len();
        let strict = self.strict;
        let mut row_number = 0usize;
        let rows = records.flat_map(move |record| {
            let record = match record {
                Ok(record) => record,
                Err(e) => return vec![Err(AppError::from(e))],
            };

            let (start_byte, start_line) = record
                .position()
                .map(|p| (p.byte() as usize, p.line()))
                .unwrap_or((0, 0));
            let gap = blank_lines_at(&bytes, start_byte);
            let mut line = start_line + gap.pending_newline as u64;

            let mut out: Vec<Result<Row>> = Vec::with_capacity(gap.blank_lines + 1);
            for _ in 0..gap.blank_lines {
                row_number += 1;
                out.push(fit_row(row_number, line, vec![String::new()], width, strict));
                line += 1;
            }

            let fields: Row = record.iter().map(str::to_string).collect();
            row_number += 1;
            out.push(fit_row(row_number, line, fields, width, strict));
            out
        });

        Ok(TableSource {
            name: TEXT_DATA_SHEET.to_string(),
            headers,
            rows: Box::new(rows),
            row_count_hint: None,
            skipped_sheets: Vec::new(),
        })
    }
}

/// Empty lines between the end of one record and the start of the next
#[derive(Debug, Default, PartialEq)]
struct LineGap {
    /// The LF of a CRLF terminator was still unread
    pending_newline: bool,
    blank_lines: usize,
}

/// Scan from the byte where the csv reader resumed to the next record
fn blank_lines_at(content: &[u8], pos: usize) -> LineGap {
    let mut gap = LineGap::default();
    let mut i = pos;

    if i > 0 && content.get(i - 1) == Some(&b'\r') && content.get(i) == Some(&b'\n') {
        gap.pending_newline = true;
        i += 1;
    }

    loop {
        match content.get(i) {
            Some(b'\n') => i += 1,
            Some(b'\r') if content.get(i + 1) == Some(&b'\n') => i += 2,
            Some(b'\r') => i += 1,
            _ => break,
        }
        gap.blank_lines += 1;
    }
    gap
}

/// Check a row against the header width, padding or truncating it in lenient mode
fn fit_row(row_number: usize, line: u64, mut fields: Row, width: usize, strict: bool) -> Result<Row> {
    if fields.len() == width {
        return Ok(fields);
    }

    if strict {
        return Err(AppError::MalformedInput(format!(
            "data row {} (line {}) has {} fields, expected {}",
            row_number,
            line,
            fields.len(),
            width
        )));
    }

    warn!(
        row = row_number,
        line,
        found = fields.len(),
        expected = width,
        "row width differs from headers; adjusting"
    );
    fields.resize(width, String::new());
    Ok(fields)
}

/// Detect delimiter from content (comma, semicolon, tab, pipe)
pub fn detect_delimiter(content: &str) -> u8 {
    let candidates = [b',', b';', b'\t', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    let mut best_delimiter = b',';
    let mut best_score = 0.0f32;

    if sample_lines.is_empty() {
        return best_delimiter;
    }

    for &delimiter in &candidates {
        let field_counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| line.bytes().filter(|&b| b == delimiter).count())
            .collect();

        // Score by consistency (low standard deviation) and frequency
        let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
        let variance = field_counts
            .iter()
            .map(|&x| (x as f32 - avg).powi(2))
            .sum::<f32>()
            / field_counts.len() as f32;

        let score = avg / (1.0 + variance.sqrt());

        if score > best_score {
            best_score = score;
            best_delimiter = delimiter;
        }
    }

    best_delimiter
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_rows(source: TableSource) -> Result<Vec<Row>> {
        source.rows.collect()
    }

    #[test]
    fn test_parse_simple_csv() {
        let content = "name,age,city\nAlice,30,NYC\nBob,25,LA";
        let source = CsvReader::new().read_content(content.to_string()).unwrap();

        assert_eq!(source.name, "Data");
        assert_eq!(source.headers, vec!["name", "age", "city"]);
        let rows = collect_rows(source).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Alice", "30", "NYC"]);
    }

    #[test]
    fn test_values_are_not_trimmed() {
        let content = "a,b\n x ,y\n";
        let source = CsvReader::new().read_content(content.to_string()).unwrap();
        let rows = collect_rows(source).unwrap();
        assert_eq!(rows[0][0], " x ");
    }

    #[test]
    fn test_quoted_fields() {
        let content = "a,b\n\"1,5\",\"say \"\"hi\"\"\"\n";
        let source = CsvReader::new().read_content(content.to_string()).unwrap();
        let rows = collect_rows(source).unwrap();
        assert_eq!(rows[0], vec!["1,5", "say \"hi\""]);
    }

    #[test]
    fn test_strict_rejects_short_row() {
        let content = "a,b,c\n1,2,3\n4,5\n";
        let source = CsvReader::new().read_content(content.to_string()).unwrap();

        match collect_rows(source) {
            Err(AppError::MalformedInput(msg)) => {
                assert!(msg.contains("data row 2"), "{}", msg);
                assert!(msg.contains("line 3"), "{}", msg);
                assert!(msg.contains("has 2 fields, expected 3"), "{}", msg);
            }
            other => panic!("expected MalformedInput, got {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn test_lenient_pads_and_truncates() {
        let content = "a,b,c\n4,5\n6,7,8,9\n";
        let source = CsvReader::new()
            .with_strict(false)
            .read_content(content.to_string())
            .unwrap();

        let rows = collect_rows(source).unwrap();
        assert_eq!(rows[0], vec!["4", "5", ""]);
        assert_eq!(rows[1], vec!["6", "7", "8"]);
    }

    #[test]
    fn test_strict_rejects_blank_line() {
        let content = "a,b\n1,2\n\n3,4\n";
        let source = CsvReader::new().read_content(content.to_string()).unwrap();

        match collect_rows(source) {
            Err(AppError::MalformedInput(msg)) => {
                assert!(msg.contains("data row 2 (line 3)"), "{}", msg);
                assert!(msg.contains("has 1 fields, expected 2"), "{}", msg);
            }
            other => panic!("expected MalformedInput, got {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn test_blank_lines_become_rows() {
        let source = CsvReader::new()
            .with_strict(false)
            .read_content("a,b\n1,2\n\n\n3,4\n".to_string())
            .unwrap();
        let rows = collect_rows(source).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1], vec!["", ""]);
        assert_eq!(rows[2], vec!["", ""]);
        assert_eq!(rows[3], vec!["3", "4"]);

        let single = CsvReader::new()
            .read_content("a\n1\n\n2\n".to_string())
            .unwrap();
        assert_eq!(collect_rows(single).unwrap(), vec![vec!["1"], vec![""], vec!["2"]]);
    }

    #[test]
    fn test_blank_lines_with_crlf() {
        let source = CsvReader::new()
            .read_content("a,b\r\n1,2\r\n\r\n3,4\r\n".to_string())
            .unwrap();
        match collect_rows(source) {
            Err(AppError::MalformedInput(msg)) => {
                assert!(msg.contains("data row 2 (line 3)"), "{}", msg);
            }
            other => panic!("expected MalformedInput, got {:?}", other.map(|r| r.len())),
        }

        assert_eq!(blank_lines_at(b"1,2\r\n3", 4), LineGap { pending_newline: true, blank_lines: 0 });
        assert_eq!(blank_lines_at(b"1,2\n\n\r\n3", 4), LineGap { pending_newline: false, blank_lines: 2 });
    }

    #[test]
    fn test_quoted_line_breaks_are_not_blank_lines() {
        let content = "a,b\n\"x\ny\",1\n2,3\n";
        let source = CsvReader::new().read_content(content.to_string()).unwrap();
        let rows = collect_rows(source).unwrap();
        assert_eq!(rows, vec![vec!["x\ny", "1"], vec!["2", "3"]]);
    }

    #[test]
    fn test_empty_content_has_no_headers() {
        let source = CsvReader::new().read_content(String::new()).unwrap();
        assert!(source.headers.is_empty());
        assert!(collect_rows(source).unwrap().is_empty());
    }

    #[test]
    fn test_lossy_decoding_and_bom() {
        let reader = CsvReader::new();
        assert_eq!(reader.decode(b"\xEF\xBB\xBFid\n1\n"), "id\n1\n");
        assert_eq!(reader.decode(b"caf\xE9"), "caf\u{FFFD}");
    }

    #[test]
    fn test_configured_encoding() {
        let config = SummaryConfig {
            encoding: "windows-1252".to_string(),
            ..Default::default()
        };
        let reader = CsvReader::from_config(&config).unwrap();
        assert_eq!(reader.decode(b"caf\xE9"), "café");
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(detect_delimiter("a\tb\nc\td"), b'\t');
        assert_eq!(detect_delimiter(""), b',');
    }

    #[test]
    fn test_auto_delimiter() {
        let content = "a|b\n1|2\n";
        let source = CsvReader::new()
            .with_delimiter(DelimiterChoice::Auto)
            .read_content(content.to_string())
            .unwrap();
        assert_eq!(source.headers, vec!["a", "b"]);
    }
}
