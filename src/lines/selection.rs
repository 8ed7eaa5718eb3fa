//! Multi-line selection by line number

use std::collections::BTreeSet;

/// Selected line numbers plus the anchor range selection extends from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSelection {
    lines: BTreeSet<usize>,
    anchor: Option<usize>,
}

impl LineSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn contains(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Selected line numbers, ascending
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.iter().copied()
    }

    /// Apply a click on `line`.
    ///
    /// Plain selects only `line`. `extend` selects the range from the anchor
    /// (or `line` when there is none) and keeps the anchor. `toggle` flips
    /// `line` and moves the anchor there. Lines outside `1..=line_count` are
    /// ignored.
    pub fn select(&mut self, line: usize, extend: bool, toggle: bool, line_count: usize) -> bool {
        if line == 0 || line > line_count {
            tracing::warn!("Selection target {} out of range", line);
            return false;
        }

        if extend {
            let anchor = self.anchor.unwrap_or(line);
            let (lo, hi) = (anchor.min(line), anchor.max(line));
            self.lines = (lo..=hi).collect();
            self.anchor = Some(anchor);
        } else if toggle {
            if !self.lines.remove(&line) {
                self.lines.insert(line);
            }
            self.anchor = Some(line);
        } else {
            self.lines.clear();
            self.lines.insert(line);
            self.anchor = Some(line);
        }
        true
    }

    pub fn select_all(&mut self, line_count: usize) {
        self.lines = (1..=line_count).collect();
        self.anchor = (line_count > 0).then_some(1);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.anchor = None;
    }
}
