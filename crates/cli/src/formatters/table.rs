//! Table formatter.
//!
//! Columns are padded to the widest cell (at least 10 characters) and the
//! header is underlined with `=`.

use super::ResourceDisplay;

const MIN_WIDTH: usize = 10;

fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len().max(MIN_WIDTH)).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    let mut push_line = |cells: Vec<String>| {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" ");
        output.push_str(line.trim_end());
        output.push('\n');
    };

    push_line(headers.iter().map(|h| h.to_string()).collect());
    push_line(widths.iter().map(|w| "=".repeat(*w)).collect());
    for row in rows {
        push_line(row.clone());
    }
    output
}

pub fn format_list<T: ResourceDisplay>(items: &[T]) -> String {
    if items.is_empty() {
        return format!("No {} found.\n", T::PLURAL);
    }
    let rows: Vec<Vec<String>> = items.iter().map(ResourceDisplay::row).collect();
    render(&T::headers(), &rows)
}

pub fn format_item<T: ResourceDisplay>(item: &T) -> String {
    let rows: Vec<Vec<String>> = T::headers()
        .into_iter()
        .zip(item.row())
        .map(|(header, value)| vec![header.to_string(), value])
        .collect();
    render(&["Property", "Value"], &rows)
}
