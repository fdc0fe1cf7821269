use colored::Colorize;

use crate::api::Customer;
use crate::view::{PageView, Row};

pub const TABLE_HEADERS: [&str; 8] = [
    "ID",
    "Nombre",
    "Apellido",
    "Email",
    "Teléfono",
    "Dirección",
    "Comida Favorita",
    "Descuento",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<ExportFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(ExportFormat::Json);
    }
    if lower.ends_with(".txt") {
        return Some(ExportFormat::Text);
    }
    None
}

pub fn render_text(customers: &[Customer]) -> Vec<u8> {
    let mut out = String::new();
    for customer in customers {
        let row = crate::view::customer_row(customer);
        out.push_str(&row.columns().join("\t"));
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_json(customers: &[Customer]) -> Vec<u8> {
    serde_json::to_vec_pretty(customers).unwrap_or_else(|_| b"[]\n".to_vec())
}

fn pad(cell: &str, width: usize) -> String {
    let mut out = String::from(cell);
    for _ in cell.chars().count()..width {
        out.push(' ');
    }
    out
}

fn render_cells(cells: &[&str], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        line.push_str("| ");
        line.push_str(&pad(cell, widths[i]));
        line.push(' ');
    }
    line.push('|');
    line
}

/// Plain-text table for the current view. Column widths track the widest
/// cell; notice rows span the full width like the original's colspan row.
pub fn render_table(view: &PageView) -> String {
    let mut widths: Vec<usize> = TABLE_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &view.rows {
        if let Row::Customer(customer) = row {
            for (i, cell) in customer.columns().iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }
    let total: usize = widths.iter().sum::<usize>() + widths.len() * 3 + 1;

    let mut out = String::new();
    out.push_str(&render_cells(&TABLE_HEADERS, &widths));
    out.push('\n');
    out.push_str(&"-".repeat(total));
    out.push('\n');
    for row in &view.rows {
        match row {
            Row::Customer(customer) => {
                let columns = customer.columns();
                out.push_str(&render_cells(&columns, &widths));
            }
            Row::Notice(text) => {
                let inner = total.saturating_sub(4);
                out.push_str(&format!("| {:<width$} |", text, width = inner));
            }
        }
        out.push('\n');
    }
    out
}

fn pager_label(name: &str, enabled: bool) -> String {
    if enabled {
        name.bold().green().to_string()
    } else {
        format!("{name} (disabled)").dimmed().to_string()
    }
}

pub fn print_view(view: &PageView) {
    println!();
    print!("{}", render_table(view));
    println!(
        ":: {} :: {} | {} ::",
        view.indicator.bold().cyan(),
        pager_label("prev", view.prev_enabled),
        pager_label("next", view.next_enabled),
    );
}

pub fn print_ok(message: &str) {
    println!(
        "{}{}{} {}",
        "[".bold().white(),
        "OK".bold().green(),
        "]".bold().white(),
        message.bold().white()
    );
}

pub fn print_err(message: &str) {
    println!(
        "{}{}{} {}",
        "[".bold().white(),
        "ERR".bold().red(),
        "]".bold().white(),
        message.bold().white()
    );
}

pub fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}
