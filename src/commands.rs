//! Side-effect commands returned by update functions
//!
//! The host executes these; results that matter to the model come back as
//! messages.

use crate::persist::PersistRequest;

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warning,
    Error,
}

impl NotifyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NotifyLevel::Info => "info",
            NotifyLevel::Warning => "warning",
            NotifyLevel::Error => "error",
        }
    }
}

/// Commands returned by update functions
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Write the whole document; the host resolves path and encoding
    Persist(PersistRequest),
    /// Show a message to the user
    Notify { level: NotifyLevel, message: String },
    /// Put text on the system clipboard
    WriteClipboard(String),
    /// Read the system clipboard and paste it after `target`
    ReadClipboard { target: Option<usize> },
    /// Execute multiple commands in order
    Batch(Vec<Cmd>),
}

impl Cmd {
    pub fn info(message: impl Into<String>) -> Self {
        Cmd::Notify {
            level: NotifyLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Cmd::Notify {
            level: NotifyLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Cmd::Notify {
            level: NotifyLevel::Error,
            message: message.into(),
        }
    }

    /// Combine commands, flattening to `None` or a single command when possible
    pub fn batch(cmds: Vec<Cmd>) -> Option<Self> {
        let mut cmds = cmds;
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Cmd::Batch(cmds)),
        }
    }

    /// Every persistence request in this command, in execution order
    pub fn persist_requests(&self) -> Vec<&PersistRequest> {
        match self {
            Cmd::Persist(request) => vec![request],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.persist_requests()).collect(),
            _ => Vec::new(),
        }
    }

    /// Every notification in this command, in execution order
    pub fn notifications(&self) -> Vec<(NotifyLevel, &str)> {
        match self {
            Cmd::Notify { level, message } => vec![(*level, message.as_str())],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.notifications()).collect(),
            _ => Vec::new(),
        }
    }
}
