use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// A user-supplied regular expression failed to compile.
    InvalidPattern { option: String, pattern: String, reason: String },
    /// The requested sheet is not part of the spreadsheet input.
    SheetNotFound { sheet: String, available: Vec<String> },
    /// A data row does not line up with the header row.
    MalformedInput(String),
    ConfigError(String),
    SpreadsheetError(String),
    WorkbookError(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidPattern {
                option,
                pattern,
                reason,
            } => write!(
                f,
                "Invalid pattern for {}: `{}`: {}",
                option, pattern, reason
            ),
            AppError::SheetNotFound { sheet, available } => write!(
                f,
                "Sheet not found: '{}' (available: {})",
                sheet,
                available.join(", ")
            ),
            AppError::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::SpreadsheetError(msg) => write!(f, "Spreadsheet error: {}", msg),
            AppError::WorkbookError(msg) => write!(f, "Workbook error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(_) => AppError::IoError(err.to_string()),
            _ => AppError::MalformedInput(err.to_string()),
        }
    }
}

impl From<calamine::Error> for AppError {
    fn from(err: calamine::Error) -> Self {
        AppError::SpreadsheetError(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AppError::WorkbookError(err.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
