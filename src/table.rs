//! Plain-text tables for terminal listings.
//!
//! Columns are separated by two spaces and sized to their widest cell. A
//! column whose cells are all digits is right-aligned. Control characters
//! inside cells are flattened to spaces so a row never spans lines.

use std::fmt::Write as _;

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let cells = rows
        .iter()
        .map(|row| {
            (0..headers.len())
                .map(|idx| flatten(row.get(idx).map(String::as_str).unwrap_or("")))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let widths = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            cells
                .iter()
                .map(|row| row[idx].chars().count())
                .chain([header.chars().count(), 1])
                .max()
                .unwrap_or(1)
        })
        .collect::<Vec<_>>();

    let numeric = (0..headers.len())
        .map(|idx| {
            !cells.is_empty()
                && cells
                    .iter()
                    .all(|row| !row[idx].is_empty() && row[idx].chars().all(|c| c.is_ascii_digit()))
        })
        .collect::<Vec<_>>();

    let mut out = String::new();
    let header_cells = headers.iter().map(|h| flatten(h)).collect::<Vec<_>>();
    let _ = writeln!(out, "{}", format_line(&header_cells, &widths, &numeric));
    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    let left = vec![false; widths.len()];
    let _ = writeln!(out, "{}", format_line(&rule, &widths, &left));
    for row in &cells {
        let _ = writeln!(out, "{}", format_line(row, &widths, &numeric));
    }
    out
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn format_line(cells: &[String], widths: &[usize], right_align: &[bool]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .zip(right_align)
        .map(|((cell, width), right)| {
            if *right {
                format!("{cell:>width$}")
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

fn flatten(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
