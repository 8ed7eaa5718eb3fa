//! JSON-lines reading
//!
//! Every non-blank line becomes a record line; lines that do not parse are
//! kept and flagged invalid so they can be fixed in the editor.

use crate::model::LineSet;

/// Parse JSON-lines text. Never fails: bad lines are marked invalid.
pub fn parse_jsonl(content: &str) -> LineSet {
    let set = LineSet::from_text(content);
    let invalid = set.invalid_count();
    if invalid > 0 {
        tracing::debug!("{} of {} lines failed to parse", invalid, set.line_count());
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_middle_line_is_kept() {
        let set = parse_jsonl("{\"a\":1}\n{oops\n{\"a\":3}\n");

        assert_eq!(set.line_count(), 3);
        assert!(set.get(1).unwrap().is_valid);
        let bad = set.get(2).unwrap();
        assert!(!bad.is_valid);
        assert!(bad.parsed.is_none());
        assert!(set.get(3).unwrap().is_valid);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let set = parse_jsonl("{\"a\":1}\r\n\r\n{\"a\":2}\r\n");
        assert_eq!(set.line_count(), 2);
        assert_eq!(set.get(2).unwrap().content, "{\"a\":2}");
    }

    #[test]
    fn test_only_blank_lines_is_empty_set() {
        assert!(parse_jsonl("\n\n  \n").is_empty());
    }
}
