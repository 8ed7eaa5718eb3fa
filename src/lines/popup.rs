//! Structured popup: edit one record as pretty-printed JSON

use serde_json::Value;

use crate::error::PopupError;
use crate::model::{Line, LineId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupState {
    /// Line the popup writes back to
    pub line_id: LineId,
    pub text: String,
    /// Last validation failure, shown until the text is edited again
    pub error: Option<String>,
}

impl PopupState {
    /// Pretty-printed record, or the raw content when the line is invalid
    pub fn open(line: &Line) -> Self {
        let text = line
            .parsed
            .as_ref()
            .and_then(|value| serde_json::to_string_pretty(value).ok())
            .unwrap_or_else(|| line.content.clone());
        Self {
            line_id: line.id,
            text,
            error: None,
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.error = None;
    }

    /// Validate the whole text as one record and return its compact rendering
    pub fn compact(&self) -> Result<String, PopupError> {
        let value: Value = serde_json::from_str(&self.text)?;
        Ok(serde_json::to_string(&value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineSet;

    #[test]
    fn test_open_pretty_prints_valid_record() {
        let set = LineSet::from_text("{\"a\":1}\n");
        let popup = PopupState::open(set.get(1).unwrap());
        assert_eq!(popup.text, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_open_invalid_shows_raw() {
        let set = LineSet::from_text("{oops\n");
        let popup = PopupState::open(set.get(1).unwrap());
        assert_eq!(popup.text, "{oops");
    }

    #[test]
    fn test_compact() {
        let set = LineSet::from_text("{oops\n");
        let mut popup = PopupState::open(set.get(1).unwrap());
        assert!(popup.compact().is_err());

        popup.set_text("{\n  \"a\": [1, 2]\n}");
        assert_eq!(popup.compact().unwrap(), "{\"a\":[1,2]}");
    }
}
