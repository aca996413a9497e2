//! Plain-text rendering of a partition table for terminal output.

use std::fmt::Write as _;

use crate::core::types::{Partition, RowModel, SortDirection, SortKey, TableState};

const COLUMNS: [(SortKey, &str); 5] = [
    (SortKey::Section, "Section"),
    (SortKey::Team, "Team"),
    (SortKey::Name, "Name"),
    (SortKey::Email, "Email"),
    (SortKey::ResponseStatus, "Submitted"),
];

/// Render `table` as an aligned text grid with a checkbox column.
///
/// The active sort column carries `^` (ascending) or `v` (descending).
pub fn render_table(partition: Partition, table: &TableState) -> String {
    let headers: Vec<String> = COLUMNS
        .iter()
        .map(|(key, title)| header(title, *key, table))
        .collect();
    let cells: Vec<[String; 5]> = table.rows().iter().map(row_cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", title(partition), table.len());
    push_line(&mut out, "   ", headers.as_slice(), &widths);
    for (row, cells) in table.rows().iter().zip(&cells) {
        let mark = if row.selected { "[x]" } else { "[ ]" };
        push_line(&mut out, mark, cells.as_slice(), &widths);
    }
    out
}

fn title(partition: Partition) -> &'static str {
    match partition {
        Partition::Students => "Students",
        Partition::Instructors => "Instructors",
    }
}

fn header(title: &str, key: SortKey, table: &TableState) -> String {
    if table.sort_key() != key {
        return title.to_string();
    }
    match table.sort_direction() {
        SortDirection::Ascending => format!("{title} ^"),
        SortDirection::Descending => format!("{title} v"),
    }
}

fn row_cells(row: &RowModel) -> [String; 5] {
    let record = &row.record;
    [
        record.section_name.clone().unwrap_or_default(),
        record.team_name.clone(),
        record.name.clone(),
        record.email.clone(),
        match record.response_status {
            Some(true) => "yes".to_string(),
            Some(false) => "no".to_string(),
            None => "-".to_string(),
        },
    ]
}

fn push_line<S: AsRef<str>>(out: &mut String, mark: &str, cells: &[S], widths: &[usize]) {
    let mut line = mark.to_string();
    for (cell, width) in cells.iter().zip(widths) {
        let _ = write!(line, "  {:<width$}", cell.as_ref(), width = *width);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
