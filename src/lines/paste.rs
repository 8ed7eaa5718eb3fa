//! Splitting pasted text into candidate records

use crate::error::PasteError;
use crate::model::parse_record;

/// Candidates of a paste after validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteCandidates {
    /// Valid records in paste order
    pub valid: Vec<String>,
    /// 1-based positions (among non-blank candidates) that failed to parse
    pub rejected: Vec<usize>,
}

impl PasteCandidates {
    /// Split on line breaks, drop blank lines, validate each candidate
    pub fn split(text: &str) -> Self {
        let mut candidates = Self::default();
        let non_blank = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty());

        for (idx, line) in non_blank.enumerate() {
            if parse_record(line).is_some() {
                candidates.valid.push(line.trim().to_string());
            } else {
                candidates.rejected.push(idx + 1);
            }
        }
        candidates
    }

    pub fn error(&self) -> Option<PasteError> {
        (!self.rejected.is_empty()).then(|| PasteError {
            rejected: self.rejected.clone(),
        })
    }
}

/// True when the text holds more than one non-blank line
pub fn is_multi_line(text: &str) -> bool {
    text.lines().filter(|l| !l.trim().is_empty()).count() > 1
}
