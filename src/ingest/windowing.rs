//! Size-based read policy for columnar files
//!
//! Three bands over the file's byte length:
//! - up to `full_read_max_bytes`: read every row
//! - up to `partial_read_max_bytes`: read at most `row_cap` rows
//! - anything larger: refuse to read

use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// Thresholds for the windowing policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowingPolicy {
    #[serde(default = "default_full_read_max_bytes")]
    pub full_read_max_bytes: u64,
    #[serde(default = "default_partial_read_max_bytes")]
    pub partial_read_max_bytes: u64,
    #[serde(default = "default_row_cap")]
    pub row_cap: usize,
}

fn default_full_read_max_bytes() -> u64 {
    16 * 1024 * 1024
}

fn default_partial_read_max_bytes() -> u64 {
    256 * 1024 * 1024
}

fn default_row_cap() -> usize {
    10_000
}

impl Default for WindowingPolicy {
    fn default() -> Self {
        Self {
            full_read_max_bytes: default_full_read_max_bytes(),
            partial_read_max_bytes: default_partial_read_max_bytes(),
            row_cap: default_row_cap(),
        }
    }
}

/// Outcome of the policy for one read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDecision {
    /// Whether the file is read at all
    pub included: bool,
    /// Maximum rows to decode, `None` for unlimited
    pub row_cap: Option<usize>,
    /// Total rows according to the file's own metadata, when known
    pub total_rows: Option<u64>,
    /// Set after the read when fewer rows were decoded than the file holds
    pub truncated: bool,
}

impl WindowingPolicy {
    /// Decide how much of a file of `byte_len` bytes to read
    pub fn decide(&self, byte_len: u64) -> WindowDecision {
        if byte_len <= self.full_read_max_bytes {
            WindowDecision {
                included: true,
                row_cap: None,
                total_rows: None,
                truncated: false,
            }
        } else if byte_len <= self.partial_read_max_bytes {
            WindowDecision {
                included: true,
                row_cap: Some(self.row_cap),
                total_rows: None,
                truncated: false,
            }
        } else {
            WindowDecision {
                included: false,
                row_cap: None,
                total_rows: None,
                truncated: false,
            }
        }
    }

    /// Like [`decide`](Self::decide), but a refused read is an error
    pub fn admit(&self, byte_len: u64) -> Result<WindowDecision, IngestError> {
        let decision = self.decide(byte_len);
        if !decision.included {
            return Err(IngestError::TooLarge {
                bytes: byte_len,
                limit: self.partial_read_max_bytes,
            });
        }
        Ok(decision)
    }
}

impl WindowDecision {
    /// Record the file's total row count and whether the cap cut it short
    pub fn record_total(&mut self, total_rows: Option<u64>) {
        self.total_rows = total_rows;
        self.truncated = match (self.row_cap, total_rows) {
            (Some(cap), Some(total)) => total > cap as u64,
            _ => false,
        };
    }
}
