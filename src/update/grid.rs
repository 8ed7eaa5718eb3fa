//! Grid editor message handlers

use super::{notify, persist};
use crate::commands::{Cmd, NotifyLevel};
use crate::messages::GridMsg;
use crate::model::AppModel;

/// Handle grid messages. View-only changes (sort, search, paging) never persist.
pub fn update_grid(model: &mut AppModel, msg: GridMsg) -> Option<Cmd> {
    let Some(grid) = model.document.grid_mut() else {
        tracing::warn!("Grid message {:?} ignored: document is not tabular", msg);
        return None;
    };

    let changed = match msg {
        GridMsg::Sort(col) => {
            grid.sort_by(col);
            false
        }
        GridMsg::Search(term) => {
            grid.search(&term);
            false
        }
        GridMsg::NextPage => {
            grid.next_page();
            false
        }
        GridMsg::PrevPage => {
            grid.prev_page();
            false
        }
        GridMsg::GotoPage(page) => {
            grid.goto_page(page);
            false
        }
        GridMsg::SetRowsPerPage(rows) => {
            grid.set_rows_per_page(rows);
            false
        }

        GridMsg::EditCell {
            view_row,
            col,
            value,
        } => grid.edit_cell(view_row, col, &value).is_some(),
        GridMsg::RenameColumn { col, name } => grid.rename_column(col, &name),
        GridMsg::InsertRow => {
            grid.insert_row();
            true
        }
        GridMsg::InsertColumn => {
            grid.insert_column();
            true
        }
        GridMsg::DeleteRow(view_row) => match grid.delete_row(view_row) {
            Ok(changed) => changed,
            Err(e) => return Some(notify(model, NotifyLevel::Warning, e.to_string())),
        },
        GridMsg::DeleteColumn(col) => match grid.delete_column(col) {
            Ok(changed) => changed,
            Err(e) => return Some(notify(model, NotifyLevel::Warning, e.to_string())),
        },

        GridMsg::ToggleView => grid.toggle_view(),
        GridMsg::RawEdited(text) => grid.raw_edited(&text),

        GridMsg::CopyPage => {
            let text = grid.copy_page();
            let rows = grid.page_rows().len();
            return copied(model, text, rows);
        }
        GridMsg::CopyAll => {
            let text = grid.copy_all();
            let rows = grid.filtered_count();
            return copied(model, text, rows);
        }
    };

    if changed {
        persist(model)
    } else {
        None
    }
}

fn copied(model: &mut AppModel, text: String, rows: usize) -> Option<Cmd> {
    let status = notify(model, NotifyLevel::Info, format!("Copied {} row(s)", rows));
    Cmd::batch(vec![Cmd::WriteClipboard(text), status])
}
