//! Open document: its source and the editor that owns its canonical model

use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::error::IngestError;
use crate::grid::GridState;
use crate::ingest::{self, Delimiter, Ingested, SourceFormat};
use crate::lines::LineEditorState;
use crate::persist::PersistRequest;

/// All sheets of a workbook, one grid each
#[derive(Debug, Clone)]
pub struct WorkbookState {
    pub names: Vec<String>,
    pub grids: Vec<GridState>,
    /// Index of the sheet being shown
    pub active: usize,
}

impl WorkbookState {
    pub fn active_name(&self) -> &str {
        self.names.get(self.active).map(String::as_str).unwrap_or("")
    }

    pub fn active_grid(&self) -> Option<&GridState> {
        self.grids.get(self.active)
    }

    pub fn active_grid_mut(&mut self) -> Option<&mut GridState> {
        self.grids.get_mut(self.active)
    }

    /// Switch sheets by name, or by 1-based number when the name is numeric
    pub fn select_sheet(&mut self, sheet: &str) -> bool {
        let by_name = self.names.iter().position(|n| n == sheet);
        let by_number = || {
            sheet
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .filter(|&idx| idx < self.names.len())
        };
        match by_name.or_else(by_number) {
            Some(idx) => {
                self.active = idx;
                true
            }
            None => false,
        }
    }
}

/// The editor a document is shown in
#[derive(Debug, Clone)]
pub enum DocumentEditor {
    Grid(GridState),
    Lines(LineEditorState),
    Workbook(WorkbookState),
}

#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub format: SourceFormat,
    pub editor: DocumentEditor,
}

impl Document {
    /// Read `path` and hand its canonical model to the matching editor
    pub fn open(path: &Path, config: &AppConfig) -> Result<Self, IngestError> {
        ingest::open(path, config)
    }

    pub fn from_ingested(
        path: PathBuf,
        format: SourceFormat,
        ingested: Ingested,
        rows_per_page: usize,
    ) -> Self {
        let delimiter = match format {
            SourceFormat::Delimited(d) => d,
            _ => Delimiter::Comma,
        };

        let editor = match ingested {
            Ingested::Table(table) => {
                DocumentEditor::Grid(GridState::new(table, delimiter, rows_per_page))
            }
            Ingested::Lines(lines) => DocumentEditor::Lines(LineEditorState::new(lines)),
            Ingested::Sheets(sheets) => {
                let (names, grids) = sheets
                    .into_iter()
                    .map(|sheet| {
                        let grid = GridState::new(sheet.table, delimiter, rows_per_page);
                        (sheet.name, grid)
                    })
                    .unzip();
                DocumentEditor::Workbook(WorkbookState {
                    names,
                    grids,
                    active: 0,
                })
            }
        };

        Self {
            path,
            format,
            editor,
        }
    }

    /// Grid being shown: the table itself or the active workbook sheet
    pub fn grid(&self) -> Option<&GridState> {
        match &self.editor {
            DocumentEditor::Grid(grid) => Some(grid),
            DocumentEditor::Workbook(book) => book.active_grid(),
            DocumentEditor::Lines(_) => None,
        }
    }

    pub fn grid_mut(&mut self) -> Option<&mut GridState> {
        match &mut self.editor {
            DocumentEditor::Grid(grid) => Some(grid),
            DocumentEditor::Workbook(book) => book.active_grid_mut(),
            DocumentEditor::Lines(_) => None,
        }
    }

    pub fn lines(&self) -> Option<&LineEditorState> {
        match &self.editor {
            DocumentEditor::Lines(lines) => Some(lines),
            _ => None,
        }
    }

    pub fn lines_mut(&mut self) -> Option<&mut LineEditorState> {
        match &mut self.editor {
            DocumentEditor::Lines(lines) => Some(lines),
            _ => None,
        }
    }

    /// Whole-document payload for the current content
    pub fn persist_request(&self) -> Option<PersistRequest> {
        match &self.editor {
            DocumentEditor::Grid(grid) => Some(grid.persist_request()),
            DocumentEditor::Lines(lines) => Some(lines.persist_request()),
            DocumentEditor::Workbook(book) => book.active_grid().map(|g| g.persist_request()),
        }
    }

    /// File name for status lines
    pub fn display_name(&self) -> String {
        crate::util::filename_for_display(&self.path)
    }
}
