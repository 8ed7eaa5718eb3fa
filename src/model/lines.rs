//! Line-oriented canonical model for JSON-lines documents
//!
//! `line_number` is positional and rewritten by [`LineSet::renumber`] after
//! every structural change. Anything that must survive a renumbering holds the
//! line's [`LineId`] instead.

use serde_json::Value;

/// Internal identifier of a line, stable for the line's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u64);

/// One record line
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: LineId,
    /// 1-based position in the set
    pub line_number: usize,
    /// Raw text as typed or read
    pub content: String,
    pub is_valid: bool,
    /// Decoded record when `is_valid`
    pub parsed: Option<Value>,
}

impl Line {
    /// Replace the raw text and re-validate it. The text is always accepted.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        match parse_record(&self.content) {
            Some(value) => {
                self.is_valid = true;
                self.parsed = Some(value);
            }
            None => {
                self.is_valid = false;
                self.parsed = None;
            }
        }
    }
}

/// Parse one structured record, `None` if the text is not valid JSON
pub fn parse_record(text: &str) -> Option<Value> {
    serde_json::from_str(text.trim()).ok()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSetMeta {
    /// Human-readable file size (e.g. "1.5 KB")
    pub file_size: String,
    pub file_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSet {
    pub lines: Vec<Line>,
    pub meta: LineSetMeta,
    next_id: u64,
}

impl LineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw text: one line per non-blank source line.
    ///
    /// Invalid lines are kept (marked invalid), never dropped.
    pub fn from_text(text: &str) -> Self {
        let mut set = Self::new();
        for raw in text.lines() {
            let content = raw.trim_end_matches('\r');
            if content.trim().is_empty() {
                continue;
            }
            let line = set.make_line(content);
            set.lines.push(line);
        }
        set.renumber();
        set
    }

    fn make_line(&mut self, content: &str) -> Line {
        let id = LineId(self.next_id);
        self.next_id += 1;
        let mut line = Line {
            id,
            line_number: 0,
            content: String::new(),
            is_valid: false,
            parsed: None,
        };
        line.set_content(content);
        line
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.lines.iter().filter(|l| !l.is_valid).count()
    }

    /// Rewrite every line number to its current 1-based position
    pub fn renumber(&mut self) {
        for (idx, line) in self.lines.iter_mut().enumerate() {
            line.line_number = idx + 1;
        }
    }

    /// Line at a 1-based position
    pub fn get(&self, line_number: usize) -> Option<&Line> {
        line_number
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
    }

    pub fn get_mut(&mut self, line_number: usize) -> Option<&mut Line> {
        line_number
            .checked_sub(1)
            .and_then(|idx| self.lines.get_mut(idx))
    }

    /// Current 1-based position of a line id
    pub fn position_of(&self, id: LineId) -> Option<usize> {
        self.lines.iter().position(|l| l.id == id).map(|i| i + 1)
    }

    pub fn by_id_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.lines.iter_mut().find(|l| l.id == id)
    }

    /// Insert new lines after `after` (0 inserts at the top, anything past the
    /// end appends). Renumbers and returns the ids of the inserted lines.
    pub fn insert_after(&mut self, after: usize, contents: &[String]) -> Vec<LineId> {
        let at = after.min(self.lines.len());
        let new_lines: Vec<Line> = contents.iter().map(|c| self.make_line(c)).collect();
        let ids = new_lines.iter().map(|l| l.id).collect();
        self.lines.splice(at..at, new_lines);
        self.renumber();
        ids
    }

    /// Remove the line at a 1-based position and renumber
    pub fn remove(&mut self, line_number: usize) -> Option<Line> {
        if line_number == 0 || line_number > self.lines.len() {
            return None;
        }
        let line = self.lines.remove(line_number - 1);
        self.renumber();
        Some(line)
    }

    /// Serialize back to JSON-lines text (one record per line, trailing newline)
    pub fn to_text(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self
            .lines
            .iter()
            .map(|l| l.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        out.push('\n');
        out
    }

    /// Line numbers, for invariant checks
    pub fn line_numbers(&self) -> Vec<usize> {
        self.lines.iter().map(|l| l.line_number).collect()
    }
}
