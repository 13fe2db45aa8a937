//! Reporting utilities: terminal tables, run summaries, and model-output
//! inspection.
//!
//! We keep formatting code in one place so:
//! - the reconciliation logic stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::diag::Diagnostics;
use crate::domain::{CompType, DataAvailability, TuningTable};
use crate::error::AppError;
use crate::io::model::ModelOutput;
use crate::schema::{VarRatioConvention, match_var_ratio_convention};
use crate::tune::{TuneOptions, TuneResult};

/// Format the run summary printed above the table.
pub fn format_run_summary(
    output: &ModelOutput,
    options: &TuneOptions,
    result: &TuneResult,
) -> String {
    let mut out = String::new();

    out.push_str("=== comptune - composition weighting suggestions ===\n");
    out.push_str(&format!("Model dir: {}\n", output.model_dir.display()));
    out.push_str(&format!(
        "Method: {} | digits: {}\n",
        options.method.label(),
        options.digits
    ));
    out.push_str(&format!(
        "Fleets: {} | rows: {}\n",
        output.fleet_count(),
        result.table.len()
    ));
    if result.addendum.is_some() {
        out.push_str("Size-frequency addendum: present (no dispersion support)\n");
    }
    if !result.diagnostics.is_empty() {
        out.push_str(&format!("Warnings: {}\n", result.diagnostics.len()));
    }
    out.push('\n');

    out
}

/// Format the tuning table for the terminal.
pub fn format_tuning_table(table: &TuningTable) -> String {
    let digits = table.digits as usize;
    let mut out = String::new();

    let header = TuningTable::header();
    out.push_str(
        format!(
            "{:<7} {:>5} {:>11} {:<4} {:>11} {:>14} {:>12} {:>15} {:>13} {:>13} {:>13} {:<4} {:<14} {}\n",
            header[0],
            header[1],
            header[2],
            header[3],
            header[4],
            header[5],
            header[6],
            header[7],
            header[8],
            header[9],
            header[10],
            header[11],
            header[12],
            header[13],
        )
        .trim_end(),
    );
    out.push('\n');

    for row in &table.rows {
        out.push_str(
            format!(
                "{:<7} {:>5} {:>11} {:<4} {:>11} {:>14} {:>12} {:>15} {:>13} {:>13} {:>13} {:<4} {:<14} {}\n",
                row.factor,
                row.fleet,
                fmt_opt(row.new_var_adj, digits),
                "#",
                fmt_opt(row.old_var_adj, digits),
                fmt_opt(row.new_dispersion, digits),
                fmt_opt(row.new_var_ratio, digits),
                fmt_opt(row.dispersion_mult, digits),
                fmt_opt(row.dispersion_lo, digits),
                fmt_opt(row.dispersion_hi, digits),
                fmt_opt(row.var_ratio_mult, digits),
                row.type_label(),
                row.fleet_name,
                row.note,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format collected warnings, one per line. Empty string when there are none.
pub fn format_warnings(diagnostics: &Diagnostics) -> String {
    let mut out = String::new();
    for warning in diagnostics.warnings() {
        out.push_str(&format!("warning: {}\n", warning.message()));
    }
    out
}

fn fmt_opt(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) => format!("{v:.digits$}"),
        None => "NA".to_string(),
    }
}

/// Per-fleet availability snapshot for `inspect`.
#[derive(Debug, Clone)]
pub struct FleetInspection {
    pub fleet: u32,
    pub name: String,
    pub length: DataAvailability,
    pub age: DataAvailability,
}

/// Everything `inspect` reports about a model output.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub fleets: Vec<FleetInspection>,
    /// Matched variance-ratio convention per fit table, `None` when the
    /// table itself is absent.
    pub len_convention: Option<&'static VarRatioConvention>,
    pub age_convention: Option<&'static VarRatioConvention>,
    pub has_size_freq: bool,
}

/// Inspect a model output: availability flags and matched schema conventions.
///
/// A fit table that exists but matches no known convention is the same fatal
/// condition the builder would hit, so it surfaces here too.
pub fn inspect_output(output: &ModelOutput) -> Result<Inspection, AppError> {
    let convention_of = |table: &Option<crate::schema::ReportTable>,
                         what: &str|
     -> Result<Option<&'static VarRatioConvention>, AppError> {
        match table {
            None => Ok(None),
            Some(t) => match_var_ratio_convention(t).map(Some).ok_or_else(|| {
                AppError::output_format(format!(
                    "The {what} fit-summary table matches no known variance-ratio column \
                     convention; the output format is too old for tuning."
                ))
            }),
        }
    };

    let len_convention = convention_of(&output.len_comp_fit, "length")?;
    let age_convention = convention_of(&output.age_comp_fit, "age")?;

    let fleets = (1..=output.fleet_count() as u32)
        .map(|fleet| FleetInspection {
            fleet,
            name: output.fleet_name(fleet).to_string(),
            length: output.availability(CompType::Length, fleet),
            age: output.availability(CompType::Age, fleet),
        })
        .collect();

    Ok(Inspection {
        fleets,
        len_convention,
        age_convention,
        has_size_freq: output.size_freq_fit.is_some(),
    })
}

/// Format the inspection for the terminal.
pub fn format_inspection(output: &ModelOutput, inspection: &Inspection) -> String {
    let mut out = String::new();

    out.push_str("=== comptune - model output inspection ===\n");
    out.push_str(&format!("Model dir: {}\n", output.model_dir.display()));
    out.push_str(&format!(
        "Length schema: {}\n",
        convention_label(inspection.len_convention)
    ));
    out.push_str(&format!(
        "Age schema: {}\n",
        convention_label(inspection.age_convention)
    ));
    out.push_str(&format!(
        "Size-frequency data: {}\n",
        if inspection.has_size_freq {
            "present (addendum only)"
        } else {
            "absent"
        }
    ));

    out.push_str(&format!(
        "\n{:<6} {:<16} {:<8} {:<8} {:<8}\n",
        "fleet", "name", "len", "age", "con-age"
    ));
    for f in &inspection.fleets {
        out.push_str(
            format!(
                "{:<6} {:<16} {:<8} {:<8} {:<8}\n",
                f.fleet,
                f.name,
                mark(f.length.has_marginal),
                mark(f.age.has_marginal),
                mark(f.age.has_conditional),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn convention_label(convention: Option<&'static VarRatioConvention>) -> String {
    match convention {
        Some(c) => format!("{} ('{}')", c.label, c.column),
        None => "no fit-summary table".to_string(),
    }
}

fn mark(present: bool) -> &'static str {
    if present { "yes" } else { "-" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TuningRow;
    use crate::error::ErrorKind;
    use crate::schema::{Cell, ReportTable};
    use std::path::PathBuf;

    fn obs_table(fleets: &[u32]) -> ReportTable {
        ReportTable {
            columns: vec!["Fleet".to_string()],
            rows: fleets.iter().map(|&f| vec![Cell::Num(f as f64)]).collect(),
        }
    }

    fn output() -> ModelOutput {
        ModelOutput {
            model_dir: PathBuf::from("/tmp/model"),
            fleet_names: vec!["FISHERY".to_string(), "SURVEY".to_string()],
            len_comp_fit: Some(ReportTable::new(vec![
                "Fleet".to_string(),
                "Curr_Var_Adj".to_string(),
                "HarMean(effN)/mean(inputN*Adj)".to_string(),
            ])),
            age_comp_fit: None,
            len_comp_obs: Some(obs_table(&[1, 2])),
            age_comp_obs: Some(obs_table(&[1])),
            con_age_obs: None,
            dispersion_len: None,
            dispersion_age: None,
            dispersion_con_age: None,
            size_freq_fit: None,
        }
    }

    #[test]
    fn inspection_reports_conventions_and_availability() {
        let inspection = inspect_output(&output()).unwrap();
        assert_eq!(inspection.len_convention.unwrap().label, "newest");
        assert!(inspection.age_convention.is_none());
        assert!(!inspection.has_size_freq);

        assert_eq!(inspection.fleets.len(), 2);
        assert!(inspection.fleets[0].length.has_marginal);
        assert!(inspection.fleets[0].age.has_marginal);
        assert!(!inspection.fleets[1].age.has_marginal);
    }

    #[test]
    fn inspection_rejects_unknown_convention() {
        let mut out = output();
        out.len_comp_fit = Some(ReportTable::new(vec![
            "Fleet".to_string(),
            "Mystery".to_string(),
        ]));
        let err = inspect_output(&out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutputFormat);
    }

    #[test]
    fn table_formatting_renders_missing_as_na() {
        let mut table = TuningTable::new(3);
        table.push(TuningRow {
            factor: 4,
            fleet: 1,
            new_var_adj: Some(0.8),
            old_var_adj: Some(1.0),
            new_dispersion: None,
            new_var_ratio: Some(0.8),
            dispersion_mult: None,
            dispersion_lo: None,
            dispersion_hi: None,
            var_ratio_mult: Some(0.8),
            comp: Some(CompType::Length),
            fleet_name: "FISHERY".to_string(),
            note: String::new(),
        });

        let text = format_tuning_table(&table);
        assert!(text.starts_with("#factor"));
        assert!(text.contains("0.800"));
        assert!(text.contains("NA"));
        assert!(text.contains("FISHERY"));
    }
}
