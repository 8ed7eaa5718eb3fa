//! Cell, row and column mutations
//!
//! Row targets are view positions (what the user sees after search and sort).
//! They are always resolved to canonical indices through the view before the
//! table is touched.

use super::model::GridState;
use crate::error::GridError;
use crate::model::CellValue;

/// Represents a completed cell edit
#[derive(Debug, Clone, PartialEq)]
pub struct CellEdit {
    /// Canonical row index
    pub row: usize,
    pub col: usize,
    pub old_value: CellValue,
    pub new_value: CellValue,
}

impl GridState {
    /// Set the cell shown at (`view_row`, `col`). Returns the edit if anything changed.
    pub fn edit_cell(&mut self, view_row: usize, col: usize, value: &str) -> Option<CellEdit> {
        let Some(row) = self.canonical_index(view_row) else {
            tracing::warn!("Edit target row {} not in view", view_row);
            return None;
        };
        let Some(cell) = self.table.rows.get_mut(row).and_then(|r| r.get_mut(col)) else {
            tracing::warn!("Edit target column {} out of range", col);
            return None;
        };

        let new_value = CellValue::text(value);
        if *cell == new_value {
            return None;
        }
        let old_value = std::mem::replace(cell, new_value.clone());
        tracing::debug!("Cell ({}, {}) edited", row, col);

        Some(CellEdit {
            row,
            col,
            old_value,
            new_value,
        })
    }

    /// Rename a column header. Returns true if it changed.
    pub fn rename_column(&mut self, col: usize, name: &str) -> bool {
        match self.table.headers.get_mut(col) {
            Some(header) if header != name => {
                *header = name.to_string();
                true
            }
            Some(_) => false,
            None => {
                tracing::warn!("Rename target column {} out of range", col);
                false
            }
        }
    }

    /// Append a row of empty cells sized to the header count
    pub fn insert_row(&mut self) {
        let width = self.table.column_count();
        self.table.rows.push(vec![CellValue::empty(); width]);
        self.table.refresh_counts();
        self.recompute_view();
    }

    /// Append a column with a generated header and an empty cell in every row
    pub fn insert_column(&mut self) {
        let name = self.table.next_column_name();
        self.table.headers.push(name);
        for row in &mut self.table.rows {
            row.push(CellValue::empty());
        }
        self.table.refresh_counts();
        self.recompute_view();
    }

    /// Delete the row shown at `view_row`.
    ///
    /// Returns `Ok(false)` when the target is not in view, and refuses to
    /// delete the last remaining row.
    pub fn delete_row(&mut self, view_row: usize) -> Result<bool, GridError> {
        let Some(row) = self.canonical_index(view_row) else {
            tracing::warn!("Delete target row {} not in view", view_row);
            return Ok(false);
        };
        if self.table.row_count() <= 1 {
            return Err(GridError::LastRow);
        }

        self.table.rows.remove(row);
        self.table.refresh_counts();
        self.recompute_view();
        Ok(true)
    }

    /// Delete a column from the headers and every row.
    ///
    /// Refuses to delete the last remaining column.
    pub fn delete_column(&mut self, col: usize) -> Result<bool, GridError> {
        if col >= self.table.column_count() {
            tracing::warn!("Delete target column {} out of range", col);
            return Ok(false);
        }
        if self.table.column_count() <= 1 {
            return Err(GridError::LastColumn);
        }

        self.table.headers.remove(col);
        for row in &mut self.table.rows {
            if col < row.len() {
                row.remove(col);
            }
        }

        self.sort = match self.sort {
            Some(sort) if sort.column == col => None,
            Some(mut sort) if sort.column > col => {
                sort.column -= 1;
                Some(sort)
            }
            other => other,
        };

        self.table.refresh_counts();
        self.recompute_view();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{parse_delimited, Delimiter};

    fn grid(content: &str) -> GridState {
        let table = parse_delimited(content, Delimiter::Comma).unwrap();
        GridState::new(table, Delimiter::Comma, 50)
    }

    #[test]
    fn test_edit_resolves_through_sorted_view() {
        let mut state = grid("name,n\nAnn,3\nBo,1\nCy,2\n");
        state.sort_by(1);

        // View order is Bo, Cy, Ann
        let edit = state.edit_cell(0, 0, "Bob").unwrap();

        assert_eq!(edit.row, 1);
        assert_eq!(state.table.rows[1][0], CellValue::text("Bob"));
        assert_eq!(state.view_row(0).unwrap()[0], CellValue::text("Bob"));
    }

    #[test]
    fn test_edit_resolves_through_filtered_view() {
        let mut state = grid("name\nAnn\nBo\nCy\n");
        state.search("cy");

        state.edit_cell(0, 0, "Cyd").unwrap();
        assert_eq!(state.table.rows[2][0], CellValue::text("Cyd"));
        assert_eq!(state.table.rows[0][0], CellValue::text("Ann"));
    }

    #[test]
    fn test_edit_unchanged_or_out_of_range_is_none() {
        let mut state = grid("a\n1\n");
        assert!(state.edit_cell(0, 0, "1").is_none());
        assert!(state.edit_cell(5, 0, "x").is_none());
        assert!(state.edit_cell(0, 5, "x").is_none());
    }

    #[test]
    fn test_insert_row_and_column_keep_widths() {
        let mut state = grid("a,b\n1,2\n");

        state.insert_row();
        state.insert_column();

        assert_eq!(state.table.headers, vec!["a", "b", "Column 3"]);
        assert_eq!(state.table.row_count(), 2);
        assert!(state.table.rows.iter().all(|r| r.len() == 3));
        assert_eq!(state.table.meta.column_count, 3);
    }

    #[test]
    fn test_insert_then_delete_restores_table() {
        let mut state = grid("a,b\n1,2\n3,4\n");
        let original = state.table.clone();

        state.insert_row();
        let last = state.filtered_count() - 1;
        assert!(state.delete_row(last).unwrap());
        assert_eq!(state.table, original);

        state.insert_column();
        assert!(state.delete_column(2).unwrap());
        assert_eq!(state.table, original);
    }

    #[test]
    fn test_last_row_and_column_cannot_be_deleted() {
        let mut state = grid("a\n1\n");

        assert_eq!(state.delete_row(0), Err(GridError::LastRow));
        assert_eq!(state.delete_column(0), Err(GridError::LastColumn));
        assert_eq!(state.table.row_count(), 1);
        assert_eq!(state.table.column_count(), 1);
    }

    #[test]
    fn test_delete_column_adjusts_sort() {
        let mut state = grid("a,b,c\n1,2,3\n");
        state.sort_by(2);
        state.delete_column(0).unwrap();
        assert_eq!(state.sort.unwrap().column, 1);

        state.delete_column(1).unwrap();
        assert!(state.sort.is_none());
    }

    #[test]
    fn test_rename_column() {
        let mut state = grid("a,b\n1,2\n");
        assert!(state.rename_column(1, "bee"));
        assert!(!state.rename_column(1, "bee"));
        assert!(!state.rename_column(7, "x"));
        assert_eq!(state.table.headers, vec!["a", "bee"]);
    }
}
