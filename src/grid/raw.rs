//! Raw-text projection and clipboard export for the grid

use super::model::{GridState, GridViewMode};
use crate::ingest::{parse_delimited, serialize_delimited, Delimiter};

impl GridState {
    /// Flip between table and raw view.
    ///
    /// Entering raw view serializes the table; leaving it re-ingests the raw
    /// text. Returns true if the canonical table changed.
    pub fn toggle_view(&mut self) -> bool {
        match self.view_mode {
            GridViewMode::Table => {
                self.raw_text = self.serialize();
                self.view_mode = GridViewMode::Raw;
                false
            }
            GridViewMode::Raw => {
                let text = std::mem::take(&mut self.raw_text);
                let changed = self.reingest(&text);
                self.view_mode = GridViewMode::Table;
                changed
            }
        }
    }

    /// Store edited raw text and re-parse it into the table.
    ///
    /// Returns true if the canonical table changed.
    pub fn raw_edited(&mut self, text: &str) -> bool {
        self.raw_text = text.to_string();
        self.reingest(text)
    }

    /// Replace headers and rows with a wholesale parse of `text`.
    ///
    /// Text with no non-blank lines, or that fails to parse, leaves the table
    /// as it was. So does text that renders the same as the current table,
    /// which keeps typed and null cells intact.
    fn reingest(&mut self, text: &str) -> bool {
        if text.lines().all(|l| l.trim().is_empty()) {
            tracing::debug!("Raw text is blank, keeping previous table");
            return false;
        }

        let mut parsed = match parse_delimited(text, self.delimiter) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!("Raw text did not parse, keeping previous table: {}", e);
                return false;
            }
        };
        if parsed.headers.is_empty() {
            return false;
        }
        parsed.fit_rows_to_headers();

        if parsed.headers == self.table.headers
            && parsed.string_rows() == self.table.string_rows()
        {
            return false;
        }

        self.table.headers = parsed.headers;
        self.table.rows = parsed.rows;
        self.table.refresh_counts();
        if self
            .sort
            .is_some_and(|s| s.column >= self.table.column_count())
        {
            self.sort = None;
        }
        self.recompute_view();
        tracing::debug!(
            "Re-ingested raw text: {} columns, {} rows",
            self.table.column_count(),
            self.table.row_count()
        );
        true
    }

    /// Tab-separated text of the current page, headers first
    pub fn copy_page(&self) -> String {
        self.export_rows(self.page_rows())
    }

    /// Tab-separated text of every row in the filtered view, headers first
    pub fn copy_all(&self) -> String {
        self.export_rows(self.view())
    }

    fn export_rows(&self, indices: &[usize]) -> String {
        let rows: Vec<Vec<String>> = indices
            .iter()
            .filter_map(|&idx| self.table.rows.get(idx))
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        match serialize_delimited(&self.table.headers, &rows, Delimiter::Tab) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Failed to export rows: {}", e);
                String::new()
            }
        }
    }
}
