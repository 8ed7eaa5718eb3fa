//! Single-line edit buffer for the line being edited
//!
//! Cursor and selection are char offsets, never byte offsets. The selection
//! is an anchor plus the cursor as head; it is empty when they coincide.

use crate::util::{word_end_after, word_start_before};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    /// Char offset of the cursor
    cursor: usize,
    /// Fixed end of the selection, `None` when nothing is selected
    anchor: Option<usize>,
    /// Text as loaded, for modification checks
    original: String,
}

impl EditBuffer {
    /// Load `text` with the cursor at the end
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
            anchor: None,
            original: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_modified(&self) -> bool {
        self.text != self.original
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Selected char range, `None` when the selection is empty
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    pub fn selected_text(&self) -> &str {
        match self.selection() {
            Some((start, end)) => {
                let (a, b) = (self.byte_offset(start), self.byte_offset(end));
                &self.text[a..b]
            }
            None => "",
        }
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Remove the selected text, leaving the cursor at its start
    fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection() else {
            self.anchor = None;
            return false;
        };
        let (a, b) = (self.byte_offset(start), self.byte_offset(end));
        self.text.replace_range(a..b, "");
        self.cursor = start;
        self.anchor = None;
        true
    }

    // === Editing ===

    pub fn insert_char(&mut self, ch: char) {
        self.delete_selection();
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert text at the cursor, replacing any selection.
    ///
    /// Line breaks are dropped since a record is one line.
    pub fn insert_text(&mut self, text: &str) {
        self.delete_selection();
        let clean: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, &clean);
        self.cursor += clean.chars().count();
    }

    /// Backspace
    pub fn delete_backward(&mut self) {
        if self.delete_selection() || self.cursor == 0 {
            return;
        }
        let (a, b) = (self.byte_offset(self.cursor - 1), self.byte_offset(self.cursor));
        self.text.replace_range(a..b, "");
        self.cursor -= 1;
    }

    /// Delete
    pub fn delete_forward(&mut self) {
        if self.delete_selection() || self.cursor >= self.len_chars() {
            return;
        }
        let (a, b) = (self.byte_offset(self.cursor), self.byte_offset(self.cursor + 1));
        self.text.replace_range(a..b, "");
    }

    // === Movement ===

    /// Move left one char; an active selection collapses to its start
    pub fn move_left(&mut self) {
        if let Some((start, _)) = self.selection() {
            self.cursor = start;
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
        self.anchor = None;
    }

    /// Move right one char; an active selection collapses to its end
    pub fn move_right(&mut self) {
        if let Some((_, end)) = self.selection() {
            self.cursor = end;
        } else {
            self.cursor = (self.cursor + 1).min(self.len_chars());
        }
        self.anchor = None;
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
        self.anchor = None;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len_chars();
        self.anchor = None;
    }

    pub fn move_word_left(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        self.cursor = word_start_before(&chars, self.cursor);
        self.anchor = None;
    }

    pub fn move_word_right(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        self.cursor = word_end_after(&chars, self.cursor);
        self.anchor = None;
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.cursor = self.len_chars();
    }

    /// Restore the text as loaded
    pub fn revert(&mut self) {
        self.text = self.original.clone();
        self.move_end();
    }
}
