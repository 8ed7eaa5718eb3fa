//! Grid editor state: the owned table plus its filtered/sorted/paged view

use std::cmp::Ordering;

use crate::ingest::{serialize_table, Delimiter};
use crate::model::{CellValue, Table};
use crate::persist::PersistRequest;

/// Default number of rows shown per page
pub const DEFAULT_ROWS_PER_PAGE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

/// Which projection of the table is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridViewMode {
    /// Structured grid
    #[default]
    Table,
    /// Delimited-text serialization of the whole table
    Raw,
}

/// State for one grid editor
#[derive(Debug, Clone)]
pub struct GridState {
    /// Canonical table; every row has `headers.len()` cells
    pub table: Table,
    /// Canonical row indices in display order (filtered, then sorted)
    pub(super) view: Vec<usize>,
    /// 1-based page number
    pub current_page: usize,
    pub rows_per_page: usize,
    pub sort: Option<SortState>,
    pub search_term: String,
    pub view_mode: GridViewMode,
    /// Raw-view text, refreshed when entering raw view and on every raw edit
    pub raw_text: String,
    /// Delimiter used for raw view and persistence
    pub delimiter: Delimiter,
}

impl GridState {
    /// Take ownership of a freshly read table.
    ///
    /// Rows are padded/truncated to the header count, and a header-less table
    /// gets one generated column so it can be edited.
    pub fn new(mut table: Table, delimiter: Delimiter, rows_per_page: usize) -> Self {
        if table.headers.is_empty() {
            let name = table.next_column_name();
            table.headers.push(name);
        }
        table.fit_rows_to_headers();

        let mut state = Self {
            table,
            view: Vec::new(),
            current_page: 1,
            rows_per_page: rows_per_page.max(1),
            sort: None,
            search_term: String::new(),
            view_mode: GridViewMode::Table,
            raw_text: String::new(),
            delimiter,
        };
        state.recompute_view();
        state
    }

    /// Canonical row indices in display order
    pub fn view(&self) -> &[usize] {
        &self.view
    }

    /// Number of rows passing the current search
    pub fn filtered_count(&self) -> usize {
        self.view.len()
    }

    /// Canonical index of the row shown at `view_row`
    pub fn canonical_index(&self, view_row: usize) -> Option<usize> {
        self.view.get(view_row).copied()
    }

    /// Row shown at `view_row`
    pub fn view_row(&self, view_row: usize) -> Option<&[CellValue]> {
        self.canonical_index(view_row)
            .and_then(|idx| self.table.rows.get(idx))
            .map(|r| r.as_slice())
    }

    pub fn is_raw(&self) -> bool {
        self.view_mode == GridViewMode::Raw
    }

    // === Sorting and searching ===

    /// Sort by `column`; reselecting the current column flips the direction
    pub fn sort_by(&mut self, column: usize) {
        if column >= self.table.column_count() {
            tracing::warn!("Sort column {} out of range", column);
            return;
        }
        self.sort = Some(match self.sort {
            Some(current) if current.column == column => SortState {
                column,
                direction: current.direction.toggled(),
            },
            _ => SortState {
                column,
                direction: SortDirection::Ascending,
            },
        });
        self.recompute_view();
        self.current_page = 1;
    }

    /// Filter rows to those with a cell containing `term` (case-insensitive)
    pub fn search(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.recompute_view();
        self.current_page = 1;
    }

    /// Rebuild the view from the canonical rows, applying search then sort
    pub(super) fn recompute_view(&mut self) {
        let needle = self.search_term.to_lowercase();
        let rows = &self.table.rows;

        let mut view: Vec<usize> = (0..rows.len())
            .filter(|&idx| {
                needle.is_empty()
                    || rows[idx]
                        .iter()
                        .any(|cell| cell.as_display().to_lowercase().contains(&needle))
            })
            .collect();

        if let Some(sort) = self.sort {
            view.sort_by(|&a, &b| {
                let ord = compare_cells(
                    rows[a].get(sort.column).unwrap_or(&CellValue::Null),
                    rows[b].get(sort.column).unwrap_or(&CellValue::Null),
                );
                match sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        self.view = view;
        self.clamp_page();
    }

    // === Paging ===

    /// Total pages, at least 1 even when nothing matches
    pub fn page_count(&self) -> usize {
        self.view.len().div_ceil(self.rows_per_page).max(1)
    }

    /// Canonical indices of the rows on the current page
    pub fn page_rows(&self) -> &[usize] {
        let start = (self.current_page - 1) * self.rows_per_page;
        let start = start.min(self.view.len());
        let end = (start + self.rows_per_page).min(self.view.len());
        &self.view[start..end]
    }

    /// View position of the first row on the current page
    pub fn page_offset(&self) -> usize {
        (self.current_page - 1) * self.rows_per_page
    }

    pub fn next_page(&mut self) {
        self.goto_page(self.current_page + 1);
    }

    pub fn prev_page(&mut self) {
        self.goto_page(self.current_page.saturating_sub(1));
    }

    /// Jump to a page, clamped to the valid range
    pub fn goto_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.page_count());
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page.max(1);
        self.current_page = 1;
    }

    fn clamp_page(&mut self) {
        self.current_page = self.current_page.clamp(1, self.page_count());
    }

    // === Persistence ===

    /// Whole-table persistence payload
    pub fn persist_request(&self) -> PersistRequest {
        PersistRequest::Tabular {
            headers: self.table.headers.clone(),
            rows: self.table.rows.clone(),
            schema: self.table.meta.source_schema.clone(),
        }
    }

    /// Delimited-text serialization of the canonical table
    pub fn serialize(&self) -> String {
        match serialize_table(&self.table, self.delimiter) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Failed to serialize table: {}", e);
                String::new()
            }
        }
    }
}

/// Numeric comparison when both cells parse as numbers, lexical otherwise
pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => a.as_display().cmp(&b.as_display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::parse_delimited;

    fn grid(content: &str, rows_per_page: usize) -> GridState {
        let table = parse_delimited(content, Delimiter::Comma).unwrap();
        GridState::new(table, Delimiter::Comma, rows_per_page)
    }

    fn column(state: &GridState, col: usize) -> Vec<String> {
        state
            .view()
            .iter()
            .map(|&idx| state.table.rows[idx][col].to_string())
            .collect()
    }

    #[test]
    fn test_new_fits_ragged_rows() {
        let state = grid("a,b,c\n1\n1,2,3,4\n", 10);
        assert!(state.table.rows.iter().all(|r| r.len() == 3));
    }

    #[test]
    fn test_new_adds_column_to_headerless_table() {
        let state = GridState::new(Table::default(), Delimiter::Comma, 10);
        assert_eq!(state.table.headers, vec!["Column 1"]);
    }

    #[test]
    fn test_sort_numeric_then_toggle() {
        let mut state = grid("n\n10\n9\n100\n", 10);

        state.sort_by(0);
        assert_eq!(column(&state, 0), vec!["9", "10", "100"]);

        state.sort_by(0);
        assert_eq!(column(&state, 0), vec!["100", "10", "9"]);
        assert_eq!(state.sort.unwrap().direction, SortDirection::Descending);
    }

    #[test]
    fn test_sort_falls_back_to_lexical() {
        let mut state = grid("n\nb\n10\na\n", 10);
        state.sort_by(0);
        assert_eq!(column(&state, 0), vec!["10", "a", "b"]);
    }

    #[test]
    fn test_sort_new_column_starts_ascending() {
        let mut state = grid("a,b\n2,x\n1,y\n", 10);
        state.sort_by(0);
        state.sort_by(0);
        state.sort_by(1);
        assert_eq!(
            state.sort,
            Some(SortState {
                column: 1,
                direction: SortDirection::Ascending
            })
        );
    }

    #[test]
    fn test_search_case_insensitive() {
        let mut state = grid("name,city\nAnn,Oslo\nBo,Bergen\nCy,OSLO\n", 10);

        state.search("oslo");
        assert_eq!(column(&state, 0), vec!["Ann", "Cy"]);

        state.search("");
        assert_eq!(state.filtered_count(), 3);
    }

    #[test]
    fn test_sort_and_search_reset_page() {
        let mut state = grid("n\n1\n2\n3\n4\n5\n", 2);
        state.goto_page(3);
        assert_eq!(state.current_page, 3);

        state.sort_by(0);
        assert_eq!(state.current_page, 1);

        state.goto_page(2);
        state.search("1");
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_paging() {
        let mut state = grid("n\n1\n2\n3\n4\n5\n", 2);

        assert_eq!(state.page_count(), 3);
        assert_eq!(state.page_rows(), &[0, 1]);
        state.next_page();
        state.next_page();
        assert_eq!(state.page_rows(), &[4]);
        state.next_page();
        assert_eq!(state.current_page, 3);
        state.goto_page(0);
        assert_eq!(state.current_page, 1);
        state.prev_page();
        assert_eq!(state.current_page, 1);

        state.set_rows_per_page(10);
        assert_eq!(state.page_count(), 1);
        assert_eq!(state.page_rows().len(), 5);
    }

    #[test]
    fn test_empty_view_has_one_page() {
        let mut state = grid("n\n1\n", 2);
        state.search("zzz");
        assert_eq!(state.page_count(), 1);
        assert!(state.page_rows().is_empty());
    }

    #[test]
    fn test_persist_request_is_whole_table() {
        let mut state = grid("a,b\n1,2\n3,4\n", 1);
        state.search("3");
        let PersistRequest::Tabular { headers, rows, .. } = state.persist_request() else {
            panic!("expected tabular payload");
        };
        assert_eq!(headers, vec!["a", "b"]);
        assert_eq!(rows.len(), 2);
    }
}
