//! Word boundaries for the inline edit buffer

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '/' | ':'
            | ','
            | '.'
            | '-'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ';'
            | '"'
            | '\''
            | '<'
            | '>'
            | '='
            | '+'
            | '*'
            | '&'
            | '|'
            | '!'
            | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '~'
            | '`'
            | '\\'
            | '?'
    )
}

/// Character class used for word movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    Whitespace,
    WordChar,
    Punctuation,
}

pub fn char_type(ch: char) -> CharType {
    if ch.is_whitespace() {
        CharType::Whitespace
    } else if is_punctuation(ch) {
        CharType::Punctuation
    } else {
        CharType::WordChar
    }
}

/// Char index of the start of the word before `pos`.
///
/// Skips non-word characters first, then the word itself.
pub fn word_start_before(chars: &[char], pos: usize) -> usize {
    let mut pos = pos.min(chars.len());
    while pos > 0 && char_type(chars[pos - 1]) != CharType::WordChar {
        pos -= 1;
    }
    while pos > 0 && char_type(chars[pos - 1]) == CharType::WordChar {
        pos -= 1;
    }
    pos
}

/// Char index just past the end of the word after `pos`
pub fn word_end_after(chars: &[char], pos: usize) -> usize {
    let mut pos = pos.min(chars.len());
    while pos < chars.len() && char_type(chars[pos]) != CharType::WordChar {
        pos += 1;
    }
    while pos < chars.len() && char_type(chars[pos]) == CharType::WordChar {
        pos += 1;
    }
    pos
}
