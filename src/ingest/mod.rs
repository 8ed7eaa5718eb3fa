//! Format readers
//!
//! Every supported encoding converges on one of two canonical models:
//!
//! ```text
//! path ─┬─ .csv .tsv .psv .txt ──────────── delimited ─┐
//!       ├─ .parquet .pq ── windowing ─────── columnar ──┼─> Table (per sheet for workbooks)
//!       ├─ .xlsx .xlsm .xlsb .xls .ods ───── workbook ──┘
//!       └─ .jsonl .ndjson ───────────────── jsonl ─────> LineSet
//! ```

mod columnar;
mod delimited;
mod jsonl;
mod windowing;
mod workbook;

use std::path::Path;

pub use columnar::read_columnar;
pub use delimited::{
    detect_delimiter, parse_delimited, serialize_delimited, serialize_table, Delimiter,
};
pub use jsonl::parse_jsonl;
pub use windowing::{WindowDecision, WindowingPolicy};
pub use workbook::{read_workbook, sheet_table, Sheet};

use crate::config::AppConfig;
use crate::error::IngestError;
use crate::model::{Document, LineSet, Table};
use crate::util::{filename_for_display, format_size, validate_file_for_opening};

/// On-disk encoding of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Delimited(Delimiter),
    JsonLines,
    Columnar,
    Workbook,
}

impl SourceFormat {
    /// Detect the format from the file extension.
    ///
    /// `.txt` is treated as delimited text with a comma placeholder; the real
    /// delimiter is sniffed from content by [`read`].
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" | "tsv" | "psv" | "txt" => Ok(SourceFormat::Delimited(Delimiter::from_extension(
                &ext,
            ))),
            "jsonl" | "ndjson" => Ok(SourceFormat::JsonLines),
            "parquet" | "pq" => Ok(SourceFormat::Columnar),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SourceFormat::Workbook),
            _ => Err(IngestError::UnsupportedFormat(filename_for_display(path))),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceFormat::Delimited(Delimiter::Tab) => "TSV",
            SourceFormat::Delimited(Delimiter::Pipe) => "PSV",
            SourceFormat::Delimited(_) => "CSV",
            SourceFormat::JsonLines => "JSON Lines",
            SourceFormat::Columnar => "Parquet",
            SourceFormat::Workbook => "Workbook",
        }
    }
}

/// A freshly read document, before any editor owns it
#[derive(Debug, Clone, PartialEq)]
pub enum Ingested {
    Table(Table),
    Lines(LineSet),
    Sheets(Vec<Sheet>),
}

/// Read a file into its canonical model.
///
/// Returns the format actually used (with the sniffed delimiter for `.txt`)
/// alongside the model.
pub fn read(path: &Path, policy: &WindowingPolicy) -> Result<(SourceFormat, Ingested), IngestError> {
    let byte_len = validate_file_for_opening(path)?;
    let format = SourceFormat::from_path(path)?;
    tracing::info!(
        "Reading {} as {} ({})",
        path.display(),
        format.label(),
        format_size(byte_len)
    );

    match format {
        SourceFormat::Delimited(delimiter) => {
            let content = read_text(path)?;
            let is_txt = path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("txt"));
            let delimiter = if is_txt {
                detect_delimiter(&content)
            } else {
                delimiter
            };
            let mut table = parse_delimited(&content, delimiter)?;
            table.meta.file_bytes = byte_len;
            table.meta.file_size = format_size(byte_len);
            Ok((SourceFormat::Delimited(delimiter), Ingested::Table(table)))
        }
        SourceFormat::JsonLines => {
            let content = read_text(path)?;
            let mut lines = parse_jsonl(&content);
            lines.meta.file_bytes = byte_len;
            lines.meta.file_size = format_size(byte_len);
            Ok((format, Ingested::Lines(lines)))
        }
        SourceFormat::Columnar => {
            let table = read_columnar(path, byte_len, policy)?;
            Ok((format, Ingested::Table(table)))
        }
        SourceFormat::Workbook => {
            let mut sheets = read_workbook(path)?;
            for sheet in &mut sheets {
                sheet.table.meta.file_bytes = byte_len;
                sheet.table.meta.file_size = format_size(byte_len);
            }
            Ok((format, Ingested::Sheets(sheets)))
        }
    }
}

/// Read a file and hand it to the editor for its format
pub fn open(path: &Path, config: &AppConfig) -> Result<Document, IngestError> {
    let (format, ingested) = read(path, &config.windowing)?;
    Ok(Document::from_ingested(
        path.to_path_buf(),
        format,
        ingested,
        config.rows_per_page,
    ))
}

fn read_text(path: &Path) -> Result<String, IngestError> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes)
        .map_err(|_| IngestError::InvalidUtf8(filename_for_display(path)))?;
    // Drop a UTF-8 byte order mark so it does not end up in the first header
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}
