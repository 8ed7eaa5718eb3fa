//! Tabular canonical model
//!
//! Headers plus ordered rows of cells. Readers are allowed to hand back ragged
//! rows; the grid editor calls [`Table::fit_rows_to_headers`] before it owns a
//! table, after which every row has exactly `headers.len()` cells.

use arrow::datatypes::SchemaRef;

use super::value::CellValue;
use crate::ingest::WindowDecision;

/// Metadata attached to a table at read time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableMeta {
    /// Human-readable file size (e.g. "1.5 KB")
    pub file_size: String,
    /// Raw file size in bytes
    pub file_bytes: u64,
    /// Row count at read time (excluding the header row)
    pub row_count: usize,
    /// Column count at read time
    pub column_count: usize,
    /// Windowing decision, columnar reads only
    pub window: Option<WindowDecision>,
    /// Arrow schema of the source file, columnar reads only.
    ///
    /// Saving casts each column back to the type of the source column with
    /// the same name.
    pub source_schema: Option<SchemaRef>,
}

impl TableMeta {
    /// Truncation notice for display, if the read was row-capped
    pub fn truncation_notice(&self) -> Option<String> {
        let window = self.window.as_ref()?;
        if !window.truncated {
            return None;
        }
        let cap = window.row_cap?;
        Some(match window.total_rows {
            Some(total) => format!("Showing first {} of {} rows", cap, total),
            None => format!("Showing first {} rows", cap),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub meta: TableMeta,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut table = Self {
            headers,
            rows,
            meta: TableMeta::default(),
        };
        table.refresh_counts();
        table
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (row, col), `None` when out of range
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Re-sync the row/column counts stored in metadata
    pub fn refresh_counts(&mut self) {
        self.meta.row_count = self.rows.len();
        self.meta.column_count = self.headers.len();
    }

    /// Pad short rows with empty text and truncate long rows to the header count
    pub fn fit_rows_to_headers(&mut self) {
        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, CellValue::empty());
        }
        self.refresh_counts();
    }

    /// Widen the table to its widest row.
    ///
    /// Missing headers get generated names, short rows are padded with nulls.
    pub fn pad_to_widest(&mut self) {
        let width = self
            .rows
            .iter()
            .map(|r| r.len())
            .max()
            .unwrap_or(0)
            .max(self.headers.len());

        while self.headers.len() < width {
            let name = self.next_column_name();
            self.headers.push(name);
        }
        for row in &mut self.rows {
            row.resize(width, CellValue::Null);
        }
        self.refresh_counts();
    }

    /// Generated header for a new column: `Column N`, skipping names already taken
    pub fn next_column_name(&self) -> String {
        let mut n = self.headers.len() + 1;
        loop {
            let candidate = format!("Column {}", n);
            if !self.headers.iter().any(|h| *h == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Rows rendered to display strings, padded/truncated to the header count
    pub fn string_rows(&self) -> Vec<Vec<String>> {
        let width = self.headers.len();
        self.rows
            .iter()
            .map(|row| {
                (0..width)
                    .map(|col| row.get(col).map(|c| c.to_string()).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}
