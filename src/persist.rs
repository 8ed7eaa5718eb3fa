//! Whole-document persistence
//!
//! Editors describe what to write as a [`PersistRequest`]; the host resolves
//! the destination and encoding from the document and calls
//! [`write_document`]. Writes go to a temporary file in the destination
//! directory which then replaces the target, so a failed write never leaves a
//! half-written document behind.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::compute::kernels::cast::{cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::NamedTempFile;

use crate::error::PersistError;
use crate::ingest::{serialize_delimited, SourceFormat};
use crate::model::CellValue;

/// The full content of a document, ready to be encoded
#[derive(Debug, Clone, PartialEq)]
pub enum PersistRequest {
    /// Headers plus every row of canonical cells
    Tabular {
        headers: Vec<String>,
        rows: Vec<Vec<CellValue>>,
        /// Column types to restore, when the document came from a typed source
        schema: Option<SchemaRef>,
    },
    /// Line-oriented text, written as is
    RawText { content: String },
}

impl PersistRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            PersistRequest::Tabular { .. } => "tabular",
            PersistRequest::RawText { .. } => "raw text",
        }
    }
}

/// Encode `request` for `format` and atomically replace the file at `path`
pub fn write_document(
    path: &Path,
    format: SourceFormat,
    request: &PersistRequest,
) -> Result<(), PersistError> {
    let bytes = encode(format, request)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(&bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path)?;

    tracing::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Encode a request into the bytes of a `format` file
pub fn encode(format: SourceFormat, request: &PersistRequest) -> Result<Vec<u8>, PersistError> {
    match (format, request) {
        (SourceFormat::Workbook, _) => Err(PersistError::Unsupported(
            "Saving workbooks is not supported".to_string(),
        )),
        (SourceFormat::Delimited(delimiter), PersistRequest::Tabular { headers, rows, .. }) => {
            let rendered: Vec<Vec<String>> = rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect();
            Ok(serialize_delimited(headers, &rendered, delimiter)?.into_bytes())
        }
        (SourceFormat::Delimited(_), PersistRequest::RawText { content })
        | (SourceFormat::JsonLines, PersistRequest::RawText { content }) => {
            Ok(content.clone().into_bytes())
        }
        (
            SourceFormat::Columnar,
            PersistRequest::Tabular {
                headers,
                rows,
                schema,
            },
        ) => encode_parquet(headers, rows, schema.as_deref()),
        (format, request) => Err(PersistError::Unsupported(format!(
            "Cannot write {} content as {}",
            request.kind(),
            format.label()
        ))),
    }
}

/// One nullable column per header.
///
/// A header that names a column of `source` is cast back to that column's
/// type; other columns, and columns whose text no longer parses as the
/// source type, are written as UTF-8. Null cells stay null.
fn encode_parquet(
    headers: &[String],
    rows: &[Vec<CellValue>],
    source: Option<&Schema>,
) -> Result<Vec<u8>, PersistError> {
    if headers.is_empty() {
        return Err(PersistError::Columnar("table has no columns".to_string()));
    }

    let mut fields = Vec::with_capacity(headers.len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(headers.len());
    for (col, name) in headers.iter().enumerate() {
        let target = source
            .and_then(|schema| schema.field_with_name(name).ok())
            .map(|field| field.data_type().clone())
            .unwrap_or(DataType::Utf8);
        let column = typed_column(name, rows, col, &target);
        fields.push(Field::new(name, column.data_type().clone(), true));
        columns.push(column);
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(buffer)
}

/// Column `col` of `rows` as an array of type `target`, or UTF-8 when the
/// cells cannot be cast
fn typed_column(name: &str, rows: &[Vec<CellValue>], col: usize, target: &DataType) -> ArrayRef {
    let is_text = matches!(target, DataType::Utf8 | DataType::LargeUtf8);
    let text: StringArray = rows
        .iter()
        .map(|row| match row.get(col) {
            None | Some(CellValue::Null) => None,
            // Blank text has no typed form
            Some(cell) if !is_text && cell.as_display().trim().is_empty() => None,
            Some(cell) => Some(cell.to_string()),
        })
        .collect();
    let text: ArrayRef = Arc::new(text);
    if *target == DataType::Utf8 {
        return text;
    }

    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    match cast_with_options(&text, target, &options) {
        Ok(typed) if typed.null_count() == text.null_count() => typed,
        Ok(_) => {
            tracing::warn!("Column {} lost values casting to {}, writing text", name, target);
            text
        }
        Err(e) => {
            tracing::warn!("Column {} kept as text, cannot cast to {}: {}", name, target, e);
            text
        }
    }
}
