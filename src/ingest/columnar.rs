//! Parquet reading under the windowing policy
//!
//! Decoded record batches are rendered to JSON objects with `arrow::json` and
//! coerced into cells from there, which gives one coercion path for every
//! arrow type: nested lists/structs arrive as JSON and are stored as compact
//! JSON text, 64-bit integers arrive exact and become text when unsafe.

use std::fs::File;
use std::path::Path;

use arrow::json::ArrayWriter;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value};

use super::windowing::WindowingPolicy;
use crate::error::IngestError;
use crate::model::{CellValue, Table};
use crate::util::{filename_for_display, format_size};

/// Read a parquet file into a table.
///
/// `byte_len` is the file size used for the windowing decision; a file over
/// the partial-read threshold fails before anything is decoded.
pub fn read_columnar(
    path: &Path,
    byte_len: u64,
    policy: &WindowingPolicy,
) -> Result<Table, IngestError> {
    let mut decision = policy.admit(byte_len)?;

    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let total_rows = u64::try_from(builder.metadata().file_metadata().num_rows()).ok();
    let source_schema = builder.schema().clone();
    let schema_columns: Vec<String> = builder
        .parquet_schema()
        .root_schema()
        .get_fields()
        .iter()
        .map(|field| field.name().to_string())
        .collect();

    let builder = match decision.row_cap {
        Some(cap) => builder.with_limit(cap),
        None => builder,
    };
    let reader = builder.build()?;

    let mut observed_columns: Vec<String> = Vec::new();
    let mut objects: Vec<Map<String, Value>> = Vec::new();
    for batch in reader {
        let batch = batch?;
        if batch.num_rows() == 0 {
            continue;
        }
        if observed_columns.is_empty() {
            observed_columns = batch
                .schema()
                .fields()
                .iter()
                .map(|f| f.name().to_string())
                .collect();
        }
        objects.extend(batch_to_objects(&batch)?);
    }

    let headers = if !observed_columns.is_empty() {
        observed_columns
    } else {
        schema_columns
    };
    if headers.is_empty() {
        return Err(IngestError::NoColumns(filename_for_display(path)));
    }

    let rows = objects
        .iter()
        .map(|object| {
            headers
                .iter()
                .map(|h| object.get(h).map(CellValue::from_json).unwrap_or_default())
                .collect()
        })
        .collect();

    decision.record_total(total_rows);
    tracing::debug!(
        "Read {} parquet rows from {} (cap {:?}, total {:?})",
        objects.len(),
        path.display(),
        decision.row_cap,
        total_rows
    );

    let mut table = Table::new(headers, rows);
    table.meta.file_bytes = byte_len;
    table.meta.file_size = format_size(byte_len);
    table.meta.window = Some(decision);
    table.meta.source_schema = Some(source_schema);
    Ok(table)
}

/// Render one batch as JSON objects keyed by column name
fn batch_to_objects(batch: &RecordBatch) -> Result<Vec<Map<String, Value>>, IngestError> {
    let mut writer = ArrayWriter::new(Vec::new());
    writer.write(batch)?;
    writer.finish()?;
    let bytes = writer.into_inner();

    serde_json::from_slice(&bytes).map_err(|e| IngestError::Columnar(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Int64Array, ListArray, StringArray};
    use arrow::datatypes::Int32Type;
    use parquet::arrow::ArrowWriter;
    use std::sync::Arc;

    fn write_parquet(path: &Path, batch: &RecordBatch) -> u64 {
        let file = File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        std::fs::metadata(path).unwrap().len()
    }

    fn id_batch(ids: Vec<i64>) -> RecordBatch {
        let names: Vec<String> = ids.iter().map(|i| format!("row {}", i)).collect();
        RecordBatch::try_from_iter(vec![
            ("id", Arc::new(Int64Array::from(ids)) as ArrayRef),
            ("name", Arc::new(StringArray::from(names)) as ArrayRef),
        ])
        .unwrap()
    }

    #[test]
    fn test_small_file_reads_all_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.parquet");
        let size = write_parquet(&path, &id_batch((1..=20).collect()));

        let table = read_columnar(&path, size, &WindowingPolicy::default()).unwrap();

        assert_eq!(table.headers, vec!["id", "name"]);
        assert_eq!(table.row_count(), 20);
        assert_eq!(table.rows[0][0].to_string(), "1");
        assert_eq!(table.rows[19][1], CellValue::text("row 20"));
        let window = table.meta.window.unwrap();
        assert!(window.included);
        assert!(!window.truncated);
        assert_eq!(window.total_rows, Some(20));
    }

    #[test]
    fn test_big_integers_coerced_to_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.parquet");
        let size = write_parquet(&path, &id_batch(vec![i64::MAX, 5]));

        let table = read_columnar(&path, size, &WindowingPolicy::default()).unwrap();

        assert_eq!(table.rows[0][0], CellValue::text("9223372036854775807"));
        assert!(matches!(table.rows[1][0], CellValue::Number(_)));
    }

    #[test]
    fn test_nested_values_rendered_as_json_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested.parquet");
        let list = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![
            Some(vec![Some(1), Some(2)]),
            None,
        ]);
        let batch =
            RecordBatch::try_from_iter(vec![("tags", Arc::new(list) as ArrayRef)]).unwrap();
        let size = write_parquet(&path, &batch);

        let table = read_columnar(&path, size, &WindowingPolicy::default()).unwrap();

        assert_eq!(table.rows[0][0], CellValue::text("[1,2]"));
        assert!(table.rows[1][0].is_null());
    }

    #[test]
    fn test_empty_file_falls_back_to_schema_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.parquet");
        let batch = RecordBatch::new_empty(id_batch(vec![1]).schema());
        let size = write_parquet(&path, &batch);

        let table = read_columnar(&path, size, &WindowingPolicy::default()).unwrap();

        assert_eq!(table.headers, vec!["id", "name"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_medium_file_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medium.parquet");
        let size = write_parquet(&path, &id_batch((1..=20).collect()));
        let policy = WindowingPolicy {
            full_read_max_bytes: size - 1,
            partial_read_max_bytes: size * 10,
            row_cap: 5,
        };

        let table = read_columnar(&path, size, &policy).unwrap();

        assert_eq!(table.row_count(), 5);
        let window = table.meta.window.unwrap();
        assert!(window.included);
        assert!(window.truncated);
        assert_eq!(window.row_cap, Some(5));
        assert_eq!(window.total_rows, Some(20));
    }

    #[test]
    fn test_large_file_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("large.parquet");
        let size = write_parquet(&path, &id_batch((1..=20).collect()));
        let policy = WindowingPolicy {
            full_read_max_bytes: size - 2,
            partial_read_max_bytes: size - 1,
            row_cap: 5,
        };

        let err = read_columnar(&path, size, &policy).unwrap_err();
        assert!(matches!(err, IngestError::TooLarge { .. }));
    }

    #[test]
    fn test_garbage_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.parquet");
        std::fs::write(&path, b"definitely not parquet").unwrap();

        let err = read_columnar(&path, 22, &WindowingPolicy::default()).unwrap_err();
        assert!(matches!(err, IngestError::Columnar(_)));
    }
}
