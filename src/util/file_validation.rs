//! File validation utilities for opening documents
//!
//! Validates files before handing them to a format reader, checking for:
//! - File existence and permissions
//! - Directories passed as documents
//! - Zero-byte files

use std::fs;
use std::path::Path;

use crate::error::IngestError;

/// Validate a file before reading it, returning its size in bytes.
///
/// Size limits are not checked here: only the columnar reader has a size
/// policy, and it applies that policy itself.
pub fn validate_file_for_opening(path: &Path) -> Result<u64, IngestError> {
    let name = filename_for_display(path);
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IngestError::NotFound(name.clone()),
        _ => IngestError::Io(e),
    })?;

    if metadata.is_dir() {
        return Err(IngestError::IsDirectory(name));
    }

    if metadata.len() == 0 {
        return Err(IngestError::Empty(name));
    }

    Ok(metadata.len())
}

/// Human-readable byte size: "512 B", "1.5 KB", "2.0 MB"
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

/// Get the filename from a path for display in error messages
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
