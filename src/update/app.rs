//! App message handlers (persistence results, workbook sheets)

use super::{notify, persist};
use crate::commands::{Cmd, NotifyLevel};
use crate::messages::AppMsg;
use crate::model::{AppModel, DocumentEditor};

/// Handle app messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Save => persist(model),

        AppMsg::PersistCompleted(result) => {
            model.ui.pending_writes = model.ui.pending_writes.saturating_sub(1);
            match result {
                Ok(()) => {
                    model.ui.last_save_error = None;
                    let name = model.document.display_name();
                    model.ui.set_status(NotifyLevel::Info, format!("Saved: {}", name));
                    None
                }
                Err(e) => {
                    tracing::error!("Persist failed: {}", e);
                    model.ui.last_save_error = Some(e.clone());
                    Some(notify(model, NotifyLevel::Error, format!("Save failed: {}", e)))
                }
            }
        }

        AppMsg::SelectSheet(sheet) => {
            let DocumentEditor::Workbook(book) = &mut model.document.editor else {
                return Some(notify(
                    model,
                    NotifyLevel::Warning,
                    "Document has no sheets",
                ));
            };
            if book.select_sheet(&sheet) {
                let name = book.active_name().to_string();
                Some(notify(model, NotifyLevel::Info, format!("Sheet: {}", name)))
            } else {
                Some(notify(
                    model,
                    NotifyLevel::Warning,
                    format!("No sheet named {}", sheet),
                ))
            }
        }
    }
}
