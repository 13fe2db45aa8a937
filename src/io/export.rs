//! Write the suggested-tuning file.
//!
//! The file is whitespace-delimited with the first header token prefixed by
//! `#`, so the rows can be pasted straight into a model configuration file:
//! everything from the in-row `#` marker onward reads as a comment there.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use crate::domain::TuningTable;
use crate::error::AppError;
use crate::io::model::ModelOutput;
use crate::schema::{Cell, ReportTable};

/// Fixed output filename inside the model directory.
pub const SUGGESTED_TUNING_FILE: &str = "suggested_tuning.ss";

/// Write the main table (and the size-frequency addendum, when present, in
/// its own column layout) to `<model_dir>/suggested_tuning.ss`.
///
/// Returns the path written.
pub fn write_suggested_tuning(
    output: &ModelOutput,
    table: &TuningTable,
    addendum: Option<&ReportTable>,
) -> Result<PathBuf, AppError> {
    let path = output.model_dir.join(SUGGESTED_TUNING_FILE);
    let mut file = File::create(&path).map_err(|e| {
        AppError::io(format!(
            "Failed to create '{}': {e}",
            path.display()
        ))
    })?;

    let body = render(table, addendum);
    file.write_all(body.as_bytes())
        .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))?;

    Ok(path)
}

fn render(table: &TuningTable, addendum: Option<&ReportTable>) -> String {
    let digits = table.digits as usize;
    let mut out = String::new();

    out.push_str(&format!(
        "# suggested tuning generated {}\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&TuningTable::header().join(" "));
    out.push('\n');

    for row in &table.rows {
        let tokens = [
            row.factor.to_string(),
            row.fleet.to_string(),
            fmt_opt(row.new_var_adj, digits),
            "#".to_string(),
            fmt_opt(row.old_var_adj, digits),
            fmt_opt(row.new_dispersion, digits),
            fmt_opt(row.new_var_ratio, digits),
            fmt_opt(row.dispersion_mult, digits),
            fmt_opt(row.dispersion_lo, digits),
            fmt_opt(row.dispersion_hi, digits),
            fmt_opt(row.var_ratio_mult, digits),
            row.type_label().to_string(),
            row.fleet_name.clone(),
            row.note.clone(),
        ];
        out.push_str(tokens.join(" ").trim_end());
        out.push('\n');
    }

    if let Some(raw) = addendum {
        out.push_str(&render_addendum(raw, digits));
    }

    out
}

/// The addendum keeps its own (different) column layout when written;
/// only the in-memory combined table degrades it to the shared columns.
fn render_addendum(raw: &ReportTable, digits: usize) -> String {
    let mut out = String::new();

    let mut header: Vec<String> = raw.columns.clone();
    if let Some(first) = header.first_mut()
        && !first.starts_with('#')
    {
        *first = format!("#{first}");
    }
    out.push_str(&header.join(" "));
    out.push('\n');

    for cells in &raw.rows {
        let tokens: Vec<String> = cells.iter().map(|c| fmt_cell(c, digits)).collect();
        out.push_str(tokens.join(" ").trim_end());
        out.push('\n');
    }

    out
}

fn fmt_opt(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) => format!("{v:.digits$}"),
        None => "NA".to_string(),
    }
}

fn fmt_cell(cell: &Cell, digits: usize) -> String {
    match cell {
        Cell::Num(v) => format!("{v:.digits$}"),
        Cell::Text(s) => s.clone(),
        Cell::Null => "NA".to_string(),
    }
}
