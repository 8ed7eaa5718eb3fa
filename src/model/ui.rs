//! UI state - status message and pending writes

use std::time::{Duration, Instant};

use crate::commands::NotifyLevel;

/// How long a status message stays visible
pub const STATUS_DURATION: Duration = Duration::from_secs(5);

/// A message shown until it expires
#[derive(Debug, Clone)]
pub struct TransientMessage {
    pub level: NotifyLevel,
    pub text: String,
    pub expires_at: Instant,
}

impl TransientMessage {
    pub fn new(level: NotifyLevel, text: impl Into<String>, duration: Duration) -> Self {
        Self {
            level,
            text: text.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub status: Option<TransientMessage>,
    /// Persistence requests sent to the host and not yet completed
    pub pending_writes: usize,
    /// Error from the most recent failed write, cleared by the next success
    pub last_save_error: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, level: NotifyLevel, text: impl Into<String>) {
        self.status = Some(TransientMessage::new(level, text, STATUS_DURATION));
    }

    /// Current status text, if it has not expired
    pub fn status_text(&self) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|m| !m.is_expired())
            .map(|m| m.text.as_str())
    }

    pub fn is_saving(&self) -> bool {
        self.pending_writes > 0
    }
}
