//! Plain-text rendering of the open document for the terminal host

use std::fmt::Write;

use crate::grid::{GridState, SortDirection};
use crate::lines::LineEditorState;
use crate::model::{AppModel, DocumentEditor};
use crate::util::filename_for_display;

/// Widest a grid cell is drawn before it is cut off
const MAX_CELL_WIDTH: usize = 24;

/// Render the whole screen: header line, editor content, status line
pub fn render(model: &AppModel) -> String {
    let doc = &model.document;
    let mut out = String::new();

    let _ = write!(
        out,
        "{} [{}]",
        filename_for_display(&doc.path),
        doc.format.label()
    );
    if model.ui.is_saving() {
        out.push_str(" (saving)");
    }
    out.push('\n');

    match &doc.editor {
        DocumentEditor::Grid(grid) => render_grid(&mut out, grid),
        DocumentEditor::Lines(lines) => render_lines(&mut out, lines),
        DocumentEditor::Workbook(book) => {
            let tabs: Vec<String> = book
                .names
                .iter()
                .enumerate()
                .map(|(idx, name)| {
                    if idx == book.active {
                        format!("[{}]", name)
                    } else {
                        name.clone()
                    }
                })
                .collect();
            let _ = writeln!(out, "Sheets: {}", tabs.join(" "));
            if let Some(grid) = book.active_grid() {
                render_grid(&mut out, grid);
            }
        }
    }

    if let Some(status) = model.ui.status_text() {
        let _ = writeln!(out, "-- {}", status);
    }
    if let Some(error) = &model.ui.last_save_error {
        let _ = writeln!(out, "!! last save failed: {}", error);
    }
    out
}

/// Current page as an aligned table, or the raw text in raw view
pub fn render_grid(out: &mut String, grid: &GridState) {
    if grid.is_raw() {
        out.push_str(&grid.raw_text);
        if !grid.raw_text.ends_with('\n') {
            out.push('\n');
        }
        let _ = writeln!(out, "-- raw view ({})", grid.delimiter.char().escape_default());
        return;
    }

    let table = &grid.table;
    let rows: Vec<Vec<String>> = grid
        .page_rows()
        .iter()
        .filter_map(|&idx| table.rows.get(idx))
        .map(|row| row.iter().map(|c| clip(&c.as_display())).collect())
        .collect();
    let headers: Vec<String> = table
        .headers
        .iter()
        .enumerate()
        .map(|(col, h)| {
            let marker = match grid.sort {
                Some(sort) if sort.column == col => match sort.direction {
                    SortDirection::Ascending => " ^",
                    SortDirection::Descending => " v",
                },
                _ => "",
            };
            clip(&format!("{}{}", h, marker))
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            rows.iter()
                .filter_map(|r| r.get(col))
                .chain(std::iter::once(&headers[col]))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();
    let gutter = (grid.page_offset() + rows.len()).to_string().len().max(1);

    let _ = write!(out, "{:>gutter$} ", "#");
    write_row(out, &headers, &widths);
    for (offset, row) in rows.iter().enumerate() {
        let _ = write!(out, "{:>gutter$} ", grid.page_offset() + offset + 1);
        write_row(out, row, &widths);
    }

    let _ = write!(
        out,
        "-- page {}/{}, {} row(s)",
        grid.current_page,
        grid.page_count(),
        grid.filtered_count()
    );
    if !grid.search_term.is_empty() {
        let _ = write!(
            out,
            " matching \"{}\" of {}",
            grid.search_term,
            table.row_count()
        );
    }
    if !table.meta.file_size.is_empty() {
        let _ = write!(out, ", {}", table.meta.file_size);
    }
    out.push('\n');
    if let Some(notice) = table.meta.truncation_notice() {
        let _ = writeln!(out, "-- {}", notice);
    }
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = widths
        .iter()
        .enumerate()
        .map(|(col, &width)| {
            let cell = cells.get(col).map(String::as_str).unwrap_or("");
            format!("{:<width$}", cell)
        })
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn clip(text: &str) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() <= MAX_CELL_WIDTH {
        return flat;
    }
    let mut clipped: String = flat.chars().take(MAX_CELL_WIDTH - 1).collect();
    clipped.push('~');
    clipped
}

/// Every line with its number and markers: `*` selected, `!` invalid, `>` editing
pub fn render_lines(out: &mut String, editor: &LineEditorState) {
    let editing = editor.editing.as_ref();
    let gutter = editor.lines.line_count().to_string().len();

    for line in &editor.lines.lines {
        let selected = if editor.selection.contains(line.line_number) {
            '*'
        } else {
            ' '
        };
        let validity = if line.is_valid { ' ' } else { '!' };

        match editing.filter(|e| e.id == line.id) {
            Some(e) => {
                let buffer = &e.buffer;
                let (before, after): (String, String) = {
                    let chars: Vec<char> = buffer.text().chars().collect();
                    let split = buffer.cursor().min(chars.len());
                    (chars[..split].iter().collect(), chars[split..].iter().collect())
                };
                let _ = writeln!(
                    out,
                    "{:>gutter$}>{} {}|{}",
                    line.line_number, validity, before, after
                );
            }
            None => {
                let _ = writeln!(
                    out,
                    "{:>gutter$}{}{} {}",
                    line.line_number, selected, validity, line.content
                );
            }
        }
    }

    let _ = writeln!(
        out,
        "-- {} line(s), {} invalid, {} selected{}",
        editor.lines.line_count(),
        editor.lines.invalid_count(),
        editor.selection.len(),
        if editor.lines.meta.file_size.is_empty() {
            String::new()
        } else {
            format!(", {}", editor.lines.meta.file_size)
        }
    );

    if let Some(popup) = &editor.popup {
        let line = editor
            .lines
            .position_of(popup.line_id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string());
        let _ = writeln!(out, "== record {} ==", line);
        let _ = writeln!(out, "{}", popup.text);
        if let Some(error) = &popup.error {
            let _ = writeln!(out, "!! {}", error);
        }
    }
}
