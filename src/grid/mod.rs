//! Grid editor for tabular documents
//!
//! [`GridState`] owns the canonical [`Table`](crate::model::Table) and a view
//! of it: the canonical row indices that pass the current search, in the
//! current sort order. Paging slices that view. Every row-addressed operation
//! takes a view position and resolves it to a canonical index first.
//!
//! The grid has two projections: the structured table and a raw delimited
//! text. Switching or editing the raw text re-parses it wholesale.

mod edit;
mod model;
mod raw;

pub use edit::CellEdit;
pub use model::{
    compare_cells, GridState, GridViewMode, SortDirection, SortState, DEFAULT_ROWS_PER_PAGE,
};
