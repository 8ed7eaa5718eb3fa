//! Line editor for JSON-lines documents
//!
//! Each line is idle, selected, or being edited. At most one line is edited
//! at a time; the edit target is held by [`LineId`] so renumbering caused by
//! other commits cannot redirect it. Every structural change clears the
//! selection and leaves line numbers at exactly `1..=N`.

mod buffer;
mod paste;
mod popup;
mod selection;

pub use buffer::EditBuffer;
pub use paste::{is_multi_line, PasteCandidates};
pub use popup::PopupState;
pub use selection::LineSelection;

use crate::error::{PasteError, PopupError};
use crate::model::{LineId, LineSet};
use crate::persist::PersistRequest;

/// Record inserted by "add line"
pub const EMPTY_RECORD: &str = "{}";

/// The line currently being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingLine {
    pub id: LineId,
    pub buffer: EditBuffer,
}

/// What a paste did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteOutcome {
    /// Records added or written into the target line
    pub inserted: usize,
    /// The document changed and must be persisted
    pub changed: bool,
    /// Candidates rejected as invalid records
    pub error: Option<PasteError>,
}

#[derive(Debug, Clone, Default)]
pub struct LineEditorState {
    pub lines: LineSet,
    pub selection: LineSelection,
    pub editing: Option<EditingLine>,
    pub popup: Option<PopupState>,
}

impl LineEditorState {
    pub fn new(lines: LineSet) -> Self {
        Self {
            lines,
            ..Default::default()
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Line number of the line being edited
    pub fn editing_line(&self) -> Option<usize> {
        self.editing
            .as_ref()
            .and_then(|e| self.lines.position_of(e.id))
    }

    pub fn buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.editing.as_mut().map(|e| &mut e.buffer)
    }

    // === Selection ===

    pub fn select(&mut self, line: usize, extend: bool, toggle: bool) -> bool {
        self.selection
            .select(line, extend, toggle, self.lines.line_count())
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(self.lines.line_count());
    }

    pub fn deselect(&mut self) {
        self.selection.clear();
    }

    /// Raw content of the selected lines joined with newlines
    pub fn copy_selection(&self) -> Option<String> {
        if self.selection.is_empty() {
            return None;
        }
        let text = self
            .selection
            .iter()
            .filter_map(|n| self.lines.get(n))
            .map(|l| l.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Some(text)
    }

    // === Inline editing ===

    /// Start editing `line`, committing any edit already in progress.
    ///
    /// Returns true if that earlier commit changed the document.
    pub fn enter_edit(&mut self, line: usize) -> bool {
        let Some(target) = self.lines.get(line).map(|l| l.id) else {
            tracing::warn!("Edit target line {} out of range", line);
            return false;
        };

        let changed = self.commit_edit();
        self.selection.clear();

        // The earlier commit may have removed the target if it was the same line
        let Some(content) = self
            .lines
            .position_of(target)
            .and_then(|n| self.lines.get(n))
            .map(|l| l.content.clone())
        else {
            return changed;
        };

        tracing::debug!("Editing line {}", line);
        self.editing = Some(EditingLine {
            id: target,
            buffer: EditBuffer::new(&content),
        });
        changed
    }

    /// Write the edit buffer back into its line.
    ///
    /// Blank text deletes the line. Any other text is accepted; validity only
    /// changes how the line is shown. Returns true if the document changed.
    pub fn commit_edit(&mut self) -> bool {
        let Some(editing) = self.editing.take() else {
            return false;
        };
        let Some(line_number) = self.lines.position_of(editing.id) else {
            return false;
        };

        let text = editing.buffer.text();
        if text.trim().is_empty() {
            self.lines.remove(line_number);
            self.selection.clear();
            tracing::debug!("Blank commit removed line {}", line_number);
            return true;
        }

        match self.lines.get_mut(line_number) {
            Some(line) if line.content != text => {
                line.set_content(text);
                tracing::debug!("Committed line {} (valid: {})", line_number, line.is_valid);
                true
            }
            _ => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        if self.editing.take().is_some() {
            tracing::debug!("Edit cancelled");
        }
    }

    // === Paste ===

    /// Paste clipboard text relative to line `target`.
    ///
    /// Single-line text while editing goes into the edit buffer at the cursor.
    /// Otherwise the text is split into candidates, invalid ones are rejected,
    /// and valid ones are inserted after `target` (appended when there is no
    /// target). If `target` is being edited, the first valid record goes into
    /// its buffer at the cursor (replacing a blank buffer outright), the edit
    /// is committed, and the rest follow it.
    pub fn paste(&mut self, target: Option<usize>, text: &str) -> PasteOutcome {
        if !is_multi_line(text) {
            if let Some(buffer) = self.buffer_mut() {
                buffer.insert_text(text.trim_end_matches(['\r', '\n']));
                return PasteOutcome::default();
            }
        }

        let candidates = PasteCandidates::split(text);
        let target_id = target.and_then(|n| self.lines.get(n)).map(|l| l.id);
        let mut valid = candidates.valid.as_slice();
        if valid.is_empty() {
            return PasteOutcome {
                error: candidates.error(),
                ..Default::default()
            };
        }

        let mut inserted = 0;
        if let Some(editing) = self.editing.as_mut() {
            if Some(editing.id) == target_id {
                if let Some((first, rest)) = valid.split_first() {
                    if editing.buffer.is_blank() {
                        editing.buffer.select_all();
                    }
                    editing.buffer.insert_text(first);
                    inserted += 1;
                    valid = rest;
                }
            }
        }
        let changed = self.commit_edit();
        self.selection.clear();

        if !valid.is_empty() {
            let after = target_id
                .and_then(|id| self.lines.position_of(id))
                .unwrap_or(self.lines.line_count());
            inserted += self.lines.insert_after(after, valid).len();
        }

        let error = candidates.error();
        tracing::debug!(
            "Pasted {} record(s), rejected {}",
            inserted,
            candidates.rejected.len()
        );
        PasteOutcome {
            inserted,
            changed: changed || inserted > 0,
            error,
        }
    }

    // === Structural edits ===

    /// Remove every selected line. Returns true if anything was removed.
    pub fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }

        let doomed: Vec<usize> = self.selection.iter().collect();
        for line_number in doomed.into_iter().rev() {
            if let Some(line) = self.lines.remove(line_number) {
                if self.editing.as_ref().is_some_and(|e| e.id == line.id) {
                    self.editing = None;
                }
            }
        }
        self.selection.clear();
        true
    }

    /// Insert an empty record after `after` (at the end when `None`) and edit it
    pub fn add_line(&mut self, after: Option<usize>) -> usize {
        let anchor = after.and_then(|n| self.lines.get(n)).map(|l| l.id);
        self.commit_edit();

        let position = anchor
            .and_then(|id| self.lines.position_of(id))
            .unwrap_or(self.lines.line_count());
        let ids = self
            .lines
            .insert_after(position, &[EMPTY_RECORD.to_string()]);
        self.selection.clear();

        let line_number = position + 1;
        if let Some(&id) = ids.first() {
            self.editing = Some(EditingLine {
                id,
                buffer: EditBuffer::new(EMPTY_RECORD),
            });
        }
        line_number
    }

    // === Structured popup ===

    pub fn open_popup(&mut self, line: usize) -> bool {
        match self.lines.get(line) {
            Some(l) => {
                self.popup = Some(PopupState::open(l));
                true
            }
            None => {
                tracing::warn!("Popup target line {} out of range", line);
                false
            }
        }
    }

    pub fn popup_edited(&mut self, text: &str) {
        if let Some(popup) = self.popup.as_mut() {
            popup.set_text(text);
        }
    }

    /// Validate the popup text and write it back compacted.
    ///
    /// On failure the popup stays open. Returns true if the document changed.
    pub fn commit_popup(&mut self) -> Result<bool, PopupError> {
        let Some(popup) = self.popup.as_mut() else {
            return Ok(false);
        };
        let compact = match popup.compact() {
            Ok(text) => text,
            Err(e) => {
                popup.error = Some(e.to_string());
                return Err(e);
            }
        };
        let id = popup.line_id;
        self.popup = None;

        if self.editing.as_ref().is_some_and(|e| e.id == id) {
            self.editing = None;
        }
        match self.lines.by_id_mut(id) {
            Some(line) if line.content != compact => {
                line.set_content(compact);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn cancel_popup(&mut self) {
        self.popup = None;
    }

    /// Whole-document persistence payload
    pub fn persist_request(&self) -> PersistRequest {
        PersistRequest::RawText {
            content: self.lines.to_text(),
        }
    }
}
