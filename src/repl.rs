//! Text commands for the terminal host
//!
//! One command per line. Row, column and page numbers are 1-based as shown by
//! `show`; they are converted to the 0-based positions the grid messages use.
//! Free text arguments understand `\n`, `\t` and `\\` escapes.

use thiserror::Error;

use crate::messages::{AppMsg, BufferMsg, GridMsg, LineMsg, Msg};

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send a message through `update`
    Msg(Msg),
    /// Print the current view
    Show,
    Help,
    Quit,
    /// Blank line or comment
    Nothing,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (try 'help')")]
    Unknown(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Not a positive number: {0}")]
    InvalidNumber(String),
}

pub const HELP: &str = "\
Grid:   sort <col> | search [text] | next | prev | page <n> | rows <n>
        set <row> <col> <text> | rename <col> <name>
        insert-row | insert-col | delete-row <row> | delete-col <col>
        toggle | raw <text> | copy-page | copy-all | sheet <name|n>
Lines:  select <n> [extend|toggle] | select-all | deselect
        edit <n> | type <text> | backspace | del | left | right
        word-left | word-right | home | end | select-text | revert
        commit | cancel | paste [<n>|end] <text> | paste-clipboard [<n>]
        delete | add [<n>] | copy
        popup <n> | popup-text <text> | popup-commit | popup-cancel
Other:  save | show | help | quit
Text arguments accept \\n, \\t and \\\\ escapes.";

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Command::Nothing);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (line, ""),
    };

    let msg: Msg = match verb {
        "show" => return Ok(Command::Show),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "save" => AppMsg::Save.into(),
        "sheet" => AppMsg::SelectSheet(required_text("sheet", "sheet name", rest)?).into(),

        // Grid
        "sort" => GridMsg::Sort(index(rest, "sort", "column")?).into(),
        "search" => GridMsg::Search(unescape(rest)).into(),
        "next" => GridMsg::NextPage.into(),
        "prev" => GridMsg::PrevPage.into(),
        "page" => GridMsg::GotoPage(number(rest, "page", "page number")?).into(),
        "rows" => GridMsg::SetRowsPerPage(number(rest, "rows", "row count")?).into(),
        "set" => {
            let (row, rest) = split_arg(rest);
            let (col, value) = split_arg(rest);
            GridMsg::EditCell {
                view_row: index(row, "set", "row")?,
                col: index(col, "set", "column")?,
                value: unescape(value),
            }
            .into()
        }
        "rename" => {
            let (col, name) = split_arg(rest);
            GridMsg::RenameColumn {
                col: index(col, "rename", "column")?,
                name: required_text("rename", "name", name)?,
            }
            .into()
        }
        "insert-row" => GridMsg::InsertRow.into(),
        "insert-col" => GridMsg::InsertColumn.into(),
        "delete-row" => GridMsg::DeleteRow(index(rest, "delete-row", "row")?).into(),
        "delete-col" => GridMsg::DeleteColumn(index(rest, "delete-col", "column")?).into(),
        "toggle" => GridMsg::ToggleView.into(),
        "raw" => GridMsg::RawEdited(unescape(rest)).into(),
        "copy-page" => GridMsg::CopyPage.into(),
        "copy-all" => GridMsg::CopyAll.into(),

        // Lines
        "select" => {
            let (line, modifier) = split_arg(rest);
            LineMsg::Select {
                line: number(line, "select", "line")?,
                extend: modifier == "extend",
                toggle: modifier == "toggle",
            }
            .into()
        }
        "select-all" => LineMsg::SelectAll.into(),
        "deselect" => LineMsg::Deselect.into(),
        "edit" => LineMsg::EnterEdit(number(rest, "edit", "line")?).into(),
        "type" => buffer(BufferMsg::InsertText(unescape(rest))),
        "backspace" => buffer(BufferMsg::DeleteBackward),
        "del" => buffer(BufferMsg::DeleteForward),
        "left" => buffer(BufferMsg::CursorLeft),
        "right" => buffer(BufferMsg::CursorRight),
        "word-left" => buffer(BufferMsg::CursorWordLeft),
        "word-right" => buffer(BufferMsg::CursorWordRight),
        "home" => buffer(BufferMsg::CursorHome),
        "end" => buffer(BufferMsg::CursorEnd),
        "select-text" => buffer(BufferMsg::SelectAll),
        "revert" => buffer(BufferMsg::Revert),
        "commit" => LineMsg::CommitEdit.into(),
        "cancel" => LineMsg::CancelEdit.into(),
        "paste" => {
            let (target, text) = paste_target(rest)?;
            LineMsg::Paste {
                target,
                text: unescape(text),
            }
            .into()
        }
        "paste-clipboard" => {
            let (target, _) = paste_target(rest)?;
            LineMsg::RequestPaste { target }.into()
        }
        "delete" => LineMsg::DeleteSelection.into(),
        "add" => {
            let after = if rest.is_empty() {
                None
            } else {
                Some(number(rest, "add", "line")?)
            };
            LineMsg::AddLine { after }.into()
        }
        "copy" => LineMsg::CopySelection.into(),
        "popup" => LineMsg::OpenPopup(number(rest, "popup", "line")?).into(),
        "popup-text" => LineMsg::PopupEdited(unescape(rest)).into(),
        "popup-commit" => LineMsg::CommitPopup.into(),
        "popup-cancel" => LineMsg::CancelPopup.into(),

        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Command::Msg(msg))
}

fn buffer(msg: BufferMsg) -> Msg {
    LineMsg::Buffer(msg).into()
}

/// First whitespace-separated word and the remainder
fn split_arg(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim_start()),
        None => (text, ""),
    }
}

/// Optional leading line number (or `end`) for paste commands
fn paste_target(text: &str) -> Result<(Option<usize>, &str), CommandError> {
    let (first, rest) = split_arg(text);
    if first == "end" {
        return Ok((None, rest));
    }
    match first.parse::<usize>() {
        Ok(n) if n > 0 => Ok((Some(n), rest)),
        Ok(_) => Err(CommandError::InvalidNumber(first.to_string())),
        Err(_) => Ok((None, text)),
    }
}

/// Positive number argument
fn number(text: &str, command: &'static str, argument: &'static str) -> Result<usize, CommandError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommandError::MissingArgument { command, argument });
    }
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidNumber(text.to_string())),
    }
}

/// 1-based argument converted to a 0-based index
fn index(text: &str, command: &'static str, argument: &'static str) -> Result<usize, CommandError> {
    number(text, command, argument).map(|n| n - 1)
}

fn required_text(
    command: &'static str,
    argument: &'static str,
    text: &str,
) -> Result<String, CommandError> {
    if text.trim().is_empty() {
        return Err(CommandError::MissingArgument { command, argument });
    }
    Ok(unescape(text))
}

/// Expand `\n`, `\t` and `\\`; any other backslash is kept
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
