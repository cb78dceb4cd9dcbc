//! Snapshot CSV serialization.

use crate::recorder::{CSV_COLUMNS, Snapshot};

/// Render all snapshots as UTF-8 CSV: header row plus one row per
/// snapshot in sampling order.
pub(crate) fn render_csv(snapshots: &[Snapshot]) -> String {
    let mut out = String::new();
    push_row(&mut out, CSV_COLUMNS.iter().map(|c| (*c).to_string()));
    for snapshot in snapshots {
        push_row(&mut out, snapshot.csv_fields().into_iter());
    }
    out
}

fn push_row(out: &mut String, fields: impl Iterator<Item = String>) {
    let row: Vec<String> = fields.map(|f| escape_field(&f)).collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

/// Double-quote fields containing the delimiter, quotes, or newlines,
/// doubling embedded quotes. The locale timestamp contains a comma, so
/// the first column is quoted in practice.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
