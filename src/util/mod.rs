//! Utility modules

pub mod file_validation;
pub mod text;

pub use file_validation::{filename_for_display, format_size, validate_file_for_opening};
pub use text::{char_type, word_end_after, word_start_before, CharType};
