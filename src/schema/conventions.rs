//! Version-dependent column adapters.
//!
//! The per-fleet fit-summary tables name the same semantic fields differently
//! across model-software versions. Each adapter declares the column name it
//! recognizes; extraction tries the adapters in a fixed priority order
//! (newest first) and fails with an `OutputFormat` error if none matches,
//! which indicates an output format too old to tune against.

use crate::error::AppError;
use crate::schema::table::ReportTable;

/// One known naming convention for the variance-ratio multiplier column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarRatioConvention {
    /// Exact column name in the fit-summary table.
    pub column: &'static str,
    /// Human-readable version label for diagnostics and `inspect`.
    pub label: &'static str,
}

/// Known conventions, newest first. The first whose column exists wins.
pub const VAR_RATIO_CONVENTIONS: &[VarRatioConvention] = &[
    VarRatioConvention {
        column: "HarMean(effN)/mean(inputN*Adj)",
        label: "newest",
    },
    VarRatioConvention {
        column: "HarMean/mean(inputN*Adj)",
        label: "intermediate",
    },
    VarRatioConvention {
        column: "MeanEffN/MeanInputN",
        label: "oldest",
    },
];

/// Known column names for the current variance adjustment, newest first.
pub const PRIOR_WEIGHT_COLUMNS: &[&str] = &["Curr_Var_Adj", "Var_Adj"];

/// Find the variance-ratio convention this table uses, if any.
pub fn match_var_ratio_convention(table: &ReportTable) -> Option<&'static VarRatioConvention> {
    VAR_RATIO_CONVENTIONS
        .iter()
        .find(|c| table.has_column(c.column))
}

fn stale_output_error(what: &str) -> AppError {
    AppError::output_format(format!(
        "Model output is missing {what}; the output format is too old for tuning."
    ))
}

/// Extract the variance-ratio multiplier for a row.
///
/// Exactly one convention must be present and the matched cell must hold a
/// number; anything else aborts the whole call.
pub fn extract_var_ratio_mult(table: &ReportTable, row: usize) -> Result<f64, AppError> {
    let convention = match_var_ratio_convention(table)
        .ok_or_else(|| stale_output_error("the variance-ratio multiplier column"))?;
    table
        .cell(row, convention.column)
        .and_then(|c| c.as_f64())
        .ok_or_else(|| stale_output_error("a variance-ratio multiplier value"))
}

/// Extract the current (prior) variance adjustment for a row.
pub fn extract_prior_weight(table: &ReportTable, row: usize) -> Result<f64, AppError> {
    let column = PRIOR_WEIGHT_COLUMNS
        .iter()
        .find(|&&name| table.has_column(name))
        .ok_or_else(|| stale_output_error("the variance-adjustment column"))?;
    table
        .cell(row, column)
        .and_then(|c| c.as_f64())
        .ok_or_else(|| stale_output_error("a variance-adjustment value"))
}
