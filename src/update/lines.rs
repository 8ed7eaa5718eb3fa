//! Line editor message handlers

use super::{notify, persist};
use crate::commands::{Cmd, NotifyLevel};
use crate::lines::EditBuffer;
use crate::messages::{BufferMsg, LineMsg};
use crate::model::AppModel;

/// Handle line editor messages
pub fn update_lines(model: &mut AppModel, msg: LineMsg) -> Option<Cmd> {
    let Some(editor) = model.document.lines_mut() else {
        tracing::warn!("Line message {:?} ignored: document is not line-oriented", msg);
        return None;
    };

    let changed = match msg {
        LineMsg::Select {
            line,
            extend,
            toggle,
        } => {
            editor.select(line, extend, toggle);
            false
        }
        LineMsg::SelectAll => {
            editor.select_all();
            false
        }
        LineMsg::Deselect => {
            editor.deselect();
            false
        }

        LineMsg::EnterEdit(line) => editor.enter_edit(line),
        LineMsg::Buffer(input) => {
            match editor.buffer_mut() {
                Some(buffer) => apply_buffer_input(buffer, input),
                None => tracing::warn!("Buffer input ignored: no line is being edited"),
            }
            false
        }
        LineMsg::CommitEdit => editor.commit_edit(),
        LineMsg::CancelEdit => {
            editor.cancel_edit();
            false
        }

        LineMsg::Paste { target, text } => {
            let outcome = editor.paste(target, &text);
            let mut cmds = Vec::new();
            if outcome.changed {
                cmds.extend(persist(model));
            }
            if let Some(error) = outcome.error {
                cmds.push(notify(model, NotifyLevel::Warning, error.to_string()));
            }
            return Cmd::batch(cmds);
        }
        LineMsg::RequestPaste { target } => return Some(Cmd::ReadClipboard { target }),

        LineMsg::DeleteSelection => editor.delete_selection(),
        LineMsg::AddLine { after } => {
            editor.add_line(after);
            true
        }
        LineMsg::CopySelection => {
            return match editor.copy_selection() {
                Some(text) => {
                    let count = editor.selection.len();
                    let status = notify(model, NotifyLevel::Info, format!("Copied {} line(s)", count));
                    Cmd::batch(vec![Cmd::WriteClipboard(text), status])
                }
                None => Some(notify(model, NotifyLevel::Info, "Nothing selected")),
            };
        }

        LineMsg::OpenPopup(line) => {
            editor.open_popup(line);
            false
        }
        LineMsg::PopupEdited(text) => {
            editor.popup_edited(&text);
            false
        }
        LineMsg::CommitPopup => match editor.commit_popup() {
            Ok(changed) => changed,
            Err(e) => return Some(notify(model, NotifyLevel::Error, e.to_string())),
        },
        LineMsg::CancelPopup => {
            editor.cancel_popup();
            false
        }
    };

    if changed {
        persist(model)
    } else {
        None
    }
}

fn apply_buffer_input(buffer: &mut EditBuffer, input: BufferMsg) {
    match input {
        BufferMsg::InsertChar(ch) => buffer.insert_char(ch),
        BufferMsg::InsertText(text) => buffer.insert_text(&text),
        BufferMsg::DeleteBackward => buffer.delete_backward(),
        BufferMsg::DeleteForward => buffer.delete_forward(),
        BufferMsg::CursorLeft => buffer.move_left(),
        BufferMsg::CursorRight => buffer.move_right(),
        BufferMsg::CursorWordLeft => buffer.move_word_left(),
        BufferMsg::CursorWordRight => buffer.move_word_right(),
        BufferMsg::CursorHome => buffer.move_home(),
        BufferMsg::CursorEnd => buffer.move_end(),
        BufferMsg::SelectAll => buffer.select_all(),
        BufferMsg::Revert => buffer.revert(),
    }
}
