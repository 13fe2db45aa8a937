//! Tuning Table Builder.
//!
//! Single-pass reconciliation of heterogeneous model-output tables into one
//! normalized row per (data type, fleet):
//!
//! - resolve which data layout each fleet has (marginal length, marginal age,
//!   conditional age-at-length)
//! - invoke the dispersion-statistic provider (conditional variant where
//!   conditional data applies)
//! - extract the prior weight and the variance-ratio multiplier through the
//!   version-dependent column adapters
//! - assemble candidate weights, round, and append a row
//!
//! Fatal conditions (bad selectors, stale report schema) abort the whole call
//! with no partial table; per-fleet gaps become notes and missing values.

use std::path::PathBuf;

use crate::diag::{Diagnostics, Warning};
use crate::domain::{
    CompType, FleetSelector, TuneMethod, TuningRow, TuningTable, round_to,
};
use crate::error::AppError;
use crate::io::model::ModelOutput;
use crate::schema::{ReportTable, extract_prior_weight, extract_var_ratio_mult};
use crate::stats::StatisticProvider;

/// Caller-facing options for one builder invocation.
#[derive(Debug, Clone)]
pub struct TuneOptions {
    pub method: TuneMethod,
    pub fleets: FleetSelector,
    /// Decimal digits for every floating output column.
    pub digits: u32,
    /// Write `<model_dir>/suggested_tuning.ss` after building.
    pub write: bool,
}

impl Default for TuneOptions {
    fn default() -> Self {
        Self {
            method: TuneMethod::None,
            fleets: FleetSelector::All,
            digits: 3,
            write: false,
        }
    }
}

/// Everything produced by one builder invocation.
#[derive(Debug, Clone)]
pub struct TuneResult {
    /// Main table plus any size-frequency addendum rows concatenated
    /// (addendum columns beyond the shared leading ones are missing).
    pub table: TuningTable,
    /// Raw size-frequency addendum, kept in its own layout for file output.
    pub addendum: Option<ReportTable>,
    /// Structured warnings raised along the way.
    pub diagnostics: Diagnostics,
    /// Path of the written file, when a write was requested.
    pub written_to: Option<PathBuf>,
}

/// Build the tuning table for one model output.
///
/// See the module docs for the overall contract. `provider` supplies the
/// dispersion-method statistic; the variance-ratio values come from the
/// model-output fit-summary tables themselves.
pub fn build_tuning_table(
    output: &ModelOutput,
    provider: &dyn StatisticProvider,
    options: &TuneOptions,
) -> Result<TuneResult, AppError> {
    // Selector validation happens before touching any report table.
    let fleets = options.fleets.resolve(output.fleet_count())?;
    let mut diagnostics = Diagnostics::new();

    let mut main = TuningTable::new(options.digits);
    for comp in [CompType::Length, CompType::Age] {
        for &fleet in &fleets {
            if let Some(row) =
                build_row(output, provider, comp, fleet, options.digits, &mut diagnostics)?
            {
                main.push(row);
            }
        }
    }

    populate_new_column(&mut main, options.method);

    let addendum = output.size_freq_fit.clone();
    if addendum.is_some() {
        diagnostics.warn(Warning::SizeFreqUnsupported);
    }

    let written_to = if options.write {
        let path =
            crate::io::export::write_suggested_tuning(output, &main, addendum.as_ref())?;
        Some(path)
    } else {
        None
    };

    let mut table = main;
    if let Some(raw) = &addendum {
        for row in merged_addendum_rows(raw, options.digits) {
            table.push(row);
        }
    }

    Ok(TuneResult {
        table,
        addendum,
        diagnostics,
        written_to,
    })
}

/// Build one row, or `None` when the fleet has no data of this type.
fn build_row(
    output: &ModelOutput,
    provider: &dyn StatisticProvider,
    comp: CompType,
    fleet: u32,
    digits: u32,
    diagnostics: &mut Diagnostics,
) -> Result<Option<TuningRow>, AppError> {
    let avail = output.availability(comp, fleet);
    if !avail.any() {
        return Ok(None);
    }

    let use_conditional = comp == CompType::Age && avail.has_conditional;
    if use_conditional && avail.has_marginal {
        diagnostics.warn(Warning::AmbiguousAgeData { fleet });
    }

    let mut stat = if avail.has_marginal {
        provider.marginal(output, comp, fleet)
    } else {
        None
    };
    if use_conditional {
        // A conditional result, when produced, replaces the marginal one.
        if let Some(cond) = provider.conditional(output, fleet) {
            stat = Some(cond);
        }
    }

    let mut note = String::new();
    if stat.is_none() {
        note.push_str("No dispersion weight");
        diagnostics.warn(Warning::MissingStatistic { comp, fleet });
    }

    let fit = output.comp_fit(comp).ok_or_else(|| {
        AppError::output_format(format!(
            "Model output has no {} fit-summary table; the output format is too old for tuning.",
            comp.label()
        ))
    })?;
    let row_idx = fit.fleet_row(fleet)?;
    let old = extract_prior_weight(fit, row_idx)?;
    let vr_mult = extract_var_ratio_mult(fit, row_idx)?;

    // Candidate weights; a missing dispersion statistic propagates.
    let new_dispersion = stat.map(|s| old * s.multiplier);
    let new_var_ratio = old * vr_mult;

    let r = |v: f64| round_to(v, digits);
    Ok(Some(TuningRow {
        factor: comp.factor(),
        fleet,
        new_var_adj: None,
        old_var_adj: Some(r(old)),
        new_dispersion: new_dispersion.map(r),
        new_var_ratio: Some(r(new_var_ratio)),
        dispersion_mult: stat.map(|s| r(s.multiplier)),
        dispersion_lo: stat.map(|s| r(s.low)),
        dispersion_hi: stat.map(|s| r(s.high)),
        var_ratio_mult: Some(r(vr_mult)),
        comp: Some(comp),
        fleet_name: output.fleet_name(fleet).to_string(),
        note,
    }))
}

/// Populate `New_Var_adj` per the selected method.
fn populate_new_column(table: &mut TuningTable, method: TuneMethod) {
    for row in &mut table.rows {
        match method {
            TuneMethod::None => row.new_var_adj = row.old_var_adj,
            TuneMethod::VarRatio => row.new_var_adj = row.new_var_ratio,
            TuneMethod::Dispersion => match row.new_dispersion {
                Some(v) => row.new_var_adj = Some(v),
                None => {
                    row.new_var_adj = row.new_var_ratio;
                    row.note.push_str("--using variance-ratio value");
                }
            },
        }
    }
}

/// Convert raw addendum rows for concatenation into the main table.
///
/// Only the leading shared columns survive (factor, fleet, `New_Var_adj`,
/// plus the constant hash marker); everything else is missing. Rows without
/// a readable fleet number are dropped, since they could not be pasted into
/// a configuration file anyway.
fn merged_addendum_rows(raw: &ReportTable, digits: u32) -> Vec<TuningRow> {
    let mut out = Vec::new();
    for cells in &raw.rows {
        let factor = cells.first().and_then(|c| c.as_f64());
        let fleet = cells.get(1).and_then(|c| c.as_f64());
        let new_var_adj = cells.get(2).and_then(|c| c.as_f64());
        let (Some(factor), Some(fleet)) = (factor, fleet) else {
            continue;
        };
        out.push(TuningRow {
            factor: factor as u8,
            fleet: fleet as u32,
            new_var_adj: new_var_adj.map(|v| round_to(v, digits)),
            old_var_adj: None,
            new_dispersion: None,
            new_var_ratio: None,
            dispersion_mult: None,
            dispersion_lo: None,
            dispersion_hi: None,
            var_ratio_mult: None,
            comp: None,
            fleet_name: String::new(),
            note: String::new(),
        });
    }
    out
}
