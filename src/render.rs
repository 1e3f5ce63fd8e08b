//! Console output helpers: tables and inline banners.

use colored::Colorize;

/// Inline failure banner, the per-screen error surface. Every API and
/// validation failure lands here; there is no global error handler.
pub fn error_banner(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message);
}

pub fn notice(message: &str) {
    println!("{} {}", "»".yellow(), message);
}

/// Render rows as a left-aligned column table.
pub fn table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let header_line = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header_line.as_str().bold());

    for row in rows {
        let line = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:width$}", cell, width = widths.get(i).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{line}");
    }
    if rows.is_empty() {
        println!("{}", "(no rows)".dimmed());
    }
}

/// Compact display for optional cells.
pub fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".into())
}

/// Shorten free-form JSON for a table cell.
pub fn json_cell(value: &serde_json::Value) -> String {
    let raw = value.to_string();
    if raw.chars().count() > 40 {
        let head: String = raw.chars().take(39).collect();
        format!("{head}…")
    } else {
        raw
    }
}
