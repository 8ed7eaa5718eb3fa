//! Delimited-text reading and writing using the csv crate
//!
//! RFC 4180 compliant parsing with support for quoted fields,
//! escaped quotes, and custom delimiters.

use std::io::Cursor;

use crate::error::IngestError;
use crate::model::{CellValue, Table};

/// Supported field delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    /// Get the character for this delimiter
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    pub fn byte(self) -> u8 {
        self.char() as u8
    }

    /// Detect delimiter from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "tsv" => Delimiter::Tab,
            "psv" => Delimiter::Pipe,
            _ => Delimiter::Comma,
        }
    }
}

/// Raw parsed records, ragged rows preserved
fn parse_records(content: &str, delimiter: Delimiter) -> Result<Vec<Vec<String>>, csv::Error> {
    let cursor = Cursor::new(content.as_bytes());

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.byte())
        .has_headers(false)
        .flexible(true)
        .from_reader(cursor);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(records)
}

/// Parse delimited text into a table.
///
/// The first record becomes the headers, every later record a row. Rows are
/// kept exactly as parsed (no padding or truncation) so malformed rows stay
/// visible; an input with no records yields an empty table.
pub fn parse_delimited(content: &str, delimiter: Delimiter) -> Result<Table, IngestError> {
    let mut records = parse_records(content, delimiter)?.into_iter();

    let Some(headers) = records.next() else {
        return Ok(Table::default());
    };

    let rows = records
        .map(|record| record.into_iter().map(CellValue::Text).collect())
        .collect();

    Ok(Table::new(headers, rows))
}

/// Serialize headers and rows back into delimited text.
///
/// Each row is padded or truncated to the header count. Quoting is applied
/// only where needed, so output may differ byte-wise from the source while
/// re-parsing to the same values.
pub fn serialize_delimited(
    headers: &[String],
    rows: &[Vec<String>],
    delimiter: Delimiter,
) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter.byte())
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(headers)?;
    let width = headers.len();
    for row in rows {
        let fitted = (0..width).map(|col| row.get(col).map(String::as_str).unwrap_or(""));
        writer.write_record(fitted)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Serialize a table into delimited text
pub fn serialize_table(table: &Table, delimiter: Delimiter) -> Result<String, csv::Error> {
    serialize_delimited(&table.headers, &table.string_rows(), delimiter)
}

/// Detect delimiter by analyzing first few lines
pub fn detect_delimiter(content: &str) -> Delimiter {
    let first_lines: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let pipe_count = first_lines.matches('|').count();
    let semi_count = first_lines.matches(';').count();

    let max = comma_count.max(tab_count).max(pipe_count).max(semi_count);

    if max == 0 {
        return Delimiter::Comma;
    }

    if tab_count == max {
        Delimiter::Tab
    } else if pipe_count == max {
        Delimiter::Pipe
    } else if semi_count == max {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}
