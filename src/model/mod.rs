//! Application model - the complete state of the editor
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod document;
pub mod lines;
pub mod table;
pub mod ui;
pub mod value;

pub use document::{Document, DocumentEditor, WorkbookState};
pub use lines::{parse_record, Line, LineId, LineSet, LineSetMeta};
pub use table::{Table, TableMeta};
pub use ui::{TransientMessage, UiState};
pub use value::{CellValue, MAX_SAFE_INTEGER};

use crate::config::AppConfig;

/// The complete application model
#[derive(Debug, Clone)]
pub struct AppModel {
    /// The one open document
    pub document: Document,
    /// Persisted configuration, with command-line overrides applied
    pub config: AppConfig,
    pub ui: UiState,
}

impl AppModel {
    pub fn new(document: Document, config: AppConfig) -> Self {
        Self {
            document,
            config,
            ui: UiState::new(),
        }
    }
}
