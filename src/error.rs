//! Error types for ingestion, persistence and editor operations.
use thiserror::Error;

/// Failure to open a document. Fatal: no editor state is built.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Cannot open directory: {0}")]
    IsDirectory(String),

    #[error("File is empty: {0}")]
    Empty(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File is not valid UTF-8 text: {0}")]
    InvalidUtf8(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File exceeds maximum supported size ({bytes} bytes, limit {limit} bytes)")]
    TooLarge { bytes: u64, limit: u64 },

    #[error("No columns could be determined from {0}")]
    NoColumns(String),

    #[error("Columnar decode error: {0}")]
    Columnar(String),

    #[error("Workbook error: {0}")]
    Workbook(String),
}

impl From<parquet::errors::ParquetError> for IngestError {
    fn from(value: parquet::errors::ParquetError) -> Self {
        Self::Columnar(value.to_string())
    }
}

impl From<arrow::error::ArrowError> for IngestError {
    fn from(value: arrow::error::ArrowError) -> Self {
        Self::Columnar(value.to_string())
    }
}

impl From<calamine::Error> for IngestError {
    fn from(value: calamine::Error) -> Self {
        Self::Workbook(value.to_string())
    }
}

/// Failure to write a document back. The in-memory model is left as is.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet write failed: {0}")]
    Columnar(String),

    #[error("{0}")]
    Unsupported(String),
}

impl From<parquet::errors::ParquetError> for PersistError {
    fn from(value: parquet::errors::ParquetError) -> Self {
        Self::Columnar(value.to_string())
    }
}

impl From<arrow::error::ArrowError> for PersistError {
    fn from(value: arrow::error::ArrowError) -> Self {
        Self::Columnar(value.to_string())
    }
}

impl From<tempfile::PersistError> for PersistError {
    fn from(value: tempfile::PersistError) -> Self {
        Self::Io(value.error)
    }
}

/// Some pasted candidate records failed validation and were skipped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} pasted line(s) rejected as invalid records (lines {})", .rejected.len(), join_numbers(.rejected))]
pub struct PasteError {
    /// 1-based positions of the rejected candidates within the pasted text
    pub rejected: Vec<usize>,
}

fn join_numbers(numbers: &[usize]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Structural grid edits that would leave the table degenerate
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("Cannot delete the last remaining row")]
    LastRow,

    #[error("Cannot delete the last remaining column")]
    LastColumn,
}

/// Structured popup text that does not parse as a single record
#[derive(Error, Debug)]
#[error("Invalid record: {0}")]
pub struct PopupError(#[from] pub serde_json::Error);
