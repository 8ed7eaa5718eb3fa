//! Multi-sheet workbook reading (xlsx, xlsm, xlsb, xls, ods) using calamine
//!
//! Every sheet becomes its own table: the first row is the header row and the
//! sheet is widened to its widest row, independently of the other sheets.

use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};

use crate::error::IngestError;
use crate::model::{CellValue, Table};
use crate::util::filename_for_display;

/// One named sheet of a workbook
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub table: Table,
}

/// Read every sheet of a workbook
pub fn read_workbook(path: &Path) -> Result<Vec<Sheet>, IngestError> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names().to_vec();
    if names.is_empty() {
        return Err(IngestError::NoColumns(filename_for_display(path)));
    }

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        let rows: Vec<Vec<CellValue>> = range
            .rows()
            .map(|row| row.iter().map(coerce_cell).collect())
            .collect();
        tracing::debug!("Sheet '{}': {} rows", name, rows.len());
        sheets.push(Sheet {
            name,
            table: sheet_table(rows),
        });
    }
    Ok(sheets)
}

/// Build a sheet table from raw cell rows: first row is the header row.
///
/// Blank header cells get generated names; the table is padded to its widest
/// row.
pub fn sheet_table(mut rows: Vec<Vec<CellValue>>) -> Table {
    if rows.is_empty() {
        return Table::default();
    }

    let header_row = rows.remove(0);
    let headers = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let name = cell.to_string();
            if name.trim().is_empty() {
                format!("Column {}", idx + 1)
            } else {
                name
            }
        })
        .collect();

    let mut table = Table::new(headers, rows);
    table.pad_to_widest();
    table
}

/// Coerce a workbook cell into a text-safe cell value
fn coerce_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::Int(i) => CellValue::from_i64(*i),
        Data::Float(f) => CellValue::from_f64(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) => CellValue::Text(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => CellValue::Text(cell.to_string()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
