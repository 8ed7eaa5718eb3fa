//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

/// Grid editor messages. Row targets are positions in the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridMsg {
    /// Sort by a column (toggles direction on the current sort column)
    Sort(usize),
    /// Filter rows by a case-insensitive substring, empty clears
    Search(String),
    NextPage,
    PrevPage,
    /// Jump to a 1-based page
    GotoPage(usize),
    SetRowsPerPage(usize),

    EditCell {
        view_row: usize,
        col: usize,
        value: String,
    },
    RenameColumn {
        col: usize,
        name: String,
    },
    InsertRow,
    InsertColumn,
    DeleteRow(usize),
    DeleteColumn(usize),

    /// Switch between the table and raw text views
    ToggleView,
    /// Raw text replaced by the user
    RawEdited(String),

    /// Copy the current page as tab-separated text
    CopyPage,
    /// Copy every row of the filtered view as tab-separated text
    CopyAll,
}

/// Edit-buffer input for the line being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferMsg {
    InsertChar(char),
    InsertText(String),
    DeleteBackward,
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorWordLeft,
    CursorWordRight,
    CursorHome,
    CursorEnd,
    SelectAll,
    /// Restore the text the line had when editing started
    Revert,
}

/// Line editor messages. Line targets are 1-based line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMsg {
    Select {
        line: usize,
        /// Extend from the anchor (shift-click)
        extend: bool,
        /// Add or remove just this line (ctrl/cmd-click)
        toggle: bool,
    },
    SelectAll,
    Deselect,

    EnterEdit(usize),
    Buffer(BufferMsg),
    CommitEdit,
    CancelEdit,

    /// Clipboard text to paste after `target` (appended when `None`)
    Paste {
        target: Option<usize>,
        text: String,
    },
    /// Ask the host for clipboard text; it answers with `Paste`
    RequestPaste { target: Option<usize> },

    DeleteSelection,
    /// Insert an empty record after a line (at the end when `None`) and edit it
    AddLine { after: Option<usize> },
    CopySelection,

    OpenPopup(usize),
    PopupEdited(String),
    CommitPopup,
    CancelPopup,
}

/// App-level messages (persistence results, workbook sheets)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMsg {
    /// Re-issue a write of the whole document
    Save,
    /// A write finished (error text on failure)
    PersistCompleted(Result<(), String>),
    /// Show another workbook sheet, by name or 1-based number
    SelectSheet(String),
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Grid(GridMsg),
    Lines(LineMsg),
    App(AppMsg),
}

impl From<GridMsg> for Msg {
    fn from(msg: GridMsg) -> Self {
        Msg::Grid(msg)
    }
}

impl From<LineMsg> for Msg {
    fn from(msg: LineMsg) -> Self {
        Msg::Lines(msg)
    }
}

impl From<AppMsg> for Msg {
    fn from(msg: AppMsg) -> Self {
        Msg::App(msg)
    }
}
