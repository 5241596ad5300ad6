//! Output formatting helpers for human-readable and JSON output.

use serde_json::Value;

use crate::cli::Format;

/// Print a response value in the selected format.
///
/// Human output prints strings without quotes, arrays one item per line and
/// objects as a two-column table. Anything nested is printed as JSON.
pub fn print_value(value: &Value, format: Format) {
    match format {
        Format::Json => println!("{value}"),
        Format::Human => match value {
            Value::String(text) => println!("{text}"),
            Value::Array(items) => {
                if items.is_empty() {
                    println!("(empty)");
                }
                for item in items {
                    println!("{}", scalar(item));
                }
            }
            Value::Object(fields) => {
                let rows: Vec<Vec<String>> = fields
                    .iter()
                    .map(|(key, value)| vec![key.clone(), scalar(value)])
                    .collect();
                print_table(&["KEY", "VALUE"], &rows);
            }
            other => println!("{other}"),
        },
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Print rows under `headers`, each column padded to its widest cell.
///
/// Cells beyond the header count are ignored. Nothing is printed for an empty
/// table.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let widths = column_widths(headers, rows);
    println!("{}", render_row(headers.iter().copied(), &widths));
    for row in rows {
        println!("{}", render_row(row.iter().map(String::as_str), &widths));
    }
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(String::len)
                .fold(header.len(), usize::max)
        })
        .collect()
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::new();
    for (cell, &width) in cells.zip(widths) {
        if !line.is_empty() {
            line.push_str("  ");
        }
        line.push_str(&format!("{cell:<width$}"));
    }
    line.trim_end().to_string()
}
