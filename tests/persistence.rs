//! End-to-end persistence through the host
//!
//! Messages go through `update`, commands through the host, writes through
//! the worker thread, and the file on disk is read back afterwards.

mod common;

use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use common::{host_output, open, temp_file, test_host};
use recordpad::ingest::{Ingested, SourceFormat, Sheet};
use recordpad::messages::{AppMsg, GridMsg, LineMsg};
use recordpad::model::{AppModel, CellValue, Document, Table};
use recordpad::{AppConfig, Msg};

fn model_for(path: &std::path::Path) -> AppModel {
    AppModel::new(open(path), AppConfig::default())
}

#[test]
fn test_grid_edit_is_written_back() {
    let (_dir, path) = temp_file("people.csv", b"name,age\n\"Jo, A\",30\n");
    let mut host = test_host(model_for(&path));

    host.dispatch(Msg::Grid(GridMsg::EditCell {
        view_row: 0,
        col: 1,
        value: "31".into(),
    }));
    host.wait_for_writes();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "name,age\n\"Jo, A\",31\n"
    );
    assert!(host.model.ui.last_save_error.is_none());
    assert_eq!(host.model.ui.pending_writes, 0);
    assert!(host.model.ui.status_text().unwrap().starts_with("Saved"));
}

#[test]
fn test_sort_is_not_persisted() {
    let (_dir, path) = temp_file("n.csv", b"n\n3\n1\n2\n");
    let mut host = test_host(model_for(&path));

    host.dispatch(Msg::Grid(GridMsg::Sort(0)));
    host.dispatch(Msg::Grid(GridMsg::InsertRow));
    host.wait_for_writes();

    // Canonical order survives; the inserted row lands at the end
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("n\n3\n1\n2\n"));
    assert_eq!(written.lines().count(), 5);
}

#[test]
fn test_writes_complete_in_request_order() {
    let (_dir, path) = temp_file("data.jsonl", b"{\"v\":0}\n");
    let mut host = test_host(model_for(&path));

    for v in 1..=5 {
        host.dispatch(Msg::Lines(LineMsg::EnterEdit(1)));
        host.dispatch(Msg::Lines(LineMsg::Buffer(
            recordpad::messages::BufferMsg::SelectAll,
        )));
        host.dispatch(Msg::Lines(LineMsg::Buffer(
            recordpad::messages::BufferMsg::InsertText(format!("{{\"v\":{}}}", v)),
        )));
        host.dispatch(Msg::Lines(LineMsg::CommitEdit));
    }
    host.wait_for_writes();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"v\":5}\n");
    assert_eq!(host.model.ui.pending_writes, 0);
}

#[test]
fn test_deleting_malformed_line_rewrites_file() {
    let (_dir, path) = temp_file("data.jsonl", b"{\"a\":1}\n{broken\n{\"b\":2}\n");
    let mut host = test_host(model_for(&path));

    host.dispatch(Msg::Lines(LineMsg::Select {
        line: 2,
        extend: false,
        toggle: false,
    }));
    host.dispatch(Msg::Lines(LineMsg::DeleteSelection));
    let (model, _) = host.shutdown();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{\"a\":1}\n{\"b\":2}\n"
    );
    assert_eq!(model.document.lines().unwrap().lines.line_numbers(), vec![1, 2]);
}

#[test]
fn test_parquet_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.parquet");
    std::fs::write(
        &path,
        recordpad::persist::encode(
            SourceFormat::Columnar,
            &recordpad::persist::PersistRequest::Tabular {
                headers: vec!["k".into(), "v".into()],
                rows: vec![vec!["a".into(), "1".into()], vec!["b".into()]],
                schema: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    let mut host = test_host(model_for(&path));

    host.dispatch(Msg::Grid(GridMsg::RenameColumn {
        col: 1,
        name: "value".into(),
    }));
    host.wait_for_writes();

    let reopened = open(&path);
    let table = &reopened.grid().unwrap().table;
    assert_eq!(table.headers, vec!["k", "value"]);
    assert_eq!(table.rows[0][0], CellValue::text("a"));
    assert_eq!(table.rows[1][1].as_display(), "");
}

/// `id: Int64 [1, 2]`, `name: Utf8 ["a", null]`
fn typed_parquet(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("typed.parquet");
    let batch = RecordBatch::try_from_iter(vec![
        ("id", Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef),
        (
            "name",
            Arc::new(StringArray::from(vec![Some("a"), None])) as ArrayRef,
        ),
    ])
    .unwrap();
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    path
}

#[test]
fn test_view_toggle_on_typed_table_does_not_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = typed_parquet(&dir);
    let before = std::fs::read(&path).unwrap();
    let mut host = test_host(model_for(&path));
    let cells = host.model.document.grid().unwrap().table.rows.clone();

    host.dispatch(Msg::Grid(GridMsg::ToggleView));
    host.dispatch(Msg::Grid(GridMsg::ToggleView));
    host.wait_for_writes();

    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert_eq!(host.model.document.grid().unwrap().table.rows, cells);
    assert_eq!(cells[1][1], CellValue::Null);
}

#[test]
fn test_parquet_edit_keeps_column_types_and_nulls() {
    let dir = tempfile::tempdir().unwrap();
    let path = typed_parquet(&dir);
    let mut host = test_host(model_for(&path));

    host.dispatch(Msg::Grid(GridMsg::EditCell {
        view_row: 0,
        col: 1,
        value: "b".into(),
    }));
    host.wait_for_writes();
    assert!(host.model.ui.last_save_error.is_none());

    let reopened = open(&path);
    let table = &reopened.grid().unwrap().table;
    assert_eq!(
        table.rows,
        vec![
            vec![CellValue::from_i64(1), CellValue::text("b")],
            vec![CellValue::from_i64(2), CellValue::Null],
        ]
    );
}

#[test]
fn test_workbook_save_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");
    std::fs::write(&path, b"untouched").unwrap();

    let sheet = Sheet {
        name: "Data".into(),
        table: Table::new(vec!["a".into()], vec![vec![CellValue::text("1")]]),
    };
    let document = Document::from_ingested(
        path.clone(),
        SourceFormat::Workbook,
        Ingested::Sheets(vec![sheet]),
        50,
    );
    let mut host = test_host(AppModel::new(document, AppConfig::default()));

    host.dispatch(Msg::Grid(GridMsg::EditCell {
        view_row: 0,
        col: 0,
        value: "2".into(),
    }));
    host.wait_for_writes();

    let error = host.model.ui.last_save_error.clone().expect("save failed");
    assert!(error.contains("not supported"));
    assert!(host_output(&mut host).contains("[error] Save failed"));
    assert_eq!(std::fs::read(&path).unwrap(), b"untouched");
    // The in-memory edit is kept
    assert_eq!(
        host.model.document.grid().unwrap().table.rows[0][0],
        CellValue::text("2")
    );
}

#[test]
fn test_failed_write_leaves_model_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.jsonl");
    std::fs::write(&path, b"1\n").unwrap();
    let mut host = test_host(model_for(&path));
    drop(dir);

    host.dispatch(Msg::Lines(LineMsg::AddLine { after: None }));
    host.wait_for_writes();

    assert!(host.model.ui.last_save_error.is_some());
    assert_eq!(host.model.document.lines().unwrap().lines.line_count(), 2);
}

#[test]
fn test_explicit_save_rewrites_document() {
    let (_dir, path) = temp_file("a.tsv", b"x\ty\n1\t2\n");
    let mut host = test_host(model_for(&path));

    host.dispatch(Msg::App(AppMsg::Save));
    host.wait_for_writes();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "x\ty\n1\t2\n");
}

#[test]
fn test_copy_then_paste_uses_in_process_clipboard() {
    let (_dir, path) = temp_file("data.jsonl", b"{\"a\":1}\n{\"b\":2}\n");
    let mut host = test_host(model_for(&path));

    host.dispatch(Msg::Lines(LineMsg::SelectAll));
    host.dispatch(Msg::Lines(LineMsg::CopySelection));
    assert_eq!(host.clipboard(), "{\"a\":1}\n{\"b\":2}");

    host.dispatch(Msg::Lines(LineMsg::RequestPaste { target: None }));
    host.wait_for_writes();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{\"a\":1}\n{\"b\":2}\n{\"a\":1}\n{\"b\":2}\n"
    );
}
