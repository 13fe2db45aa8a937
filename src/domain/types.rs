//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while assembling the tuning table
//! - exported to the `suggested_tuning.ss` file
//! - inspected programmatically by callers (e.g., batch scripts)

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Composition data category a tuning row refers to.
///
/// The numeric factor codes match the variance-adjustment factor numbering of
/// the target model configuration file: 4 for length comps, 5 for age comps.
/// (Generalized size-frequency rows carry factor 7, taken from the model
/// output rather than this enum; see the addendum handling in `tune`.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompType {
    Length,
    Age,
}

impl CompType {
    /// Variance-adjustment factor code in the model configuration schema.
    pub fn factor(self) -> u8 {
        match self {
            CompType::Length => 4,
            CompType::Age => 5,
        }
    }

    /// Short label used in the `Type` output column.
    pub fn label(self) -> &'static str {
        match self {
            CompType::Length => "len",
            CompType::Age => "age",
        }
    }
}

/// Which method populates the final `New_Var_adj` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TuneMethod {
    /// Copy the prior weight unchanged (dry run).
    None,
    /// Residual-dispersion method, falling back to the variance-ratio
    /// candidate where the dispersion statistic is unavailable.
    Dispersion,
    /// Variance-ratio method.
    VarRatio,
}

impl TuneMethod {
    /// Parse a user-supplied method string.
    ///
    /// The set of accepted values is closed; anything else is an
    /// `InvalidInput` error raised before any computation.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "none" => Ok(TuneMethod::None),
            "dispersion" => Ok(TuneMethod::Dispersion),
            "var-ratio" => Ok(TuneMethod::VarRatio),
            other => Err(AppError::invalid_input(format!(
                "Unrecognized method '{other}'. Expected one of: none, dispersion, var-ratio."
            ))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TuneMethod::None => "none",
            TuneMethod::Dispersion => "dispersion",
            TuneMethod::VarRatio => "var-ratio",
        }
    }
}

/// Which fleets to tune.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleetSelector {
    /// Every fleet in the model, `1..=fleet_count`.
    All,
    /// An explicit set of fleet numbers.
    List(Vec<u32>),
}

impl FleetSelector {
    /// Parse a user-supplied fleet selector: `"all"` or a comma-separated
    /// list of fleet numbers (e.g. `"1,3"`).
    pub fn parse(s: &str) -> Result<Self, AppError> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(FleetSelector::All);
        }
        let mut fleets = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let fleet: u32 = part.parse().map_err(|_| {
                AppError::invalid_input(format!(
                    "Invalid fleet selector '{s}': '{part}' is not a fleet number."
                ))
            })?;
            fleets.push(fleet);
        }
        if fleets.is_empty() {
            return Err(AppError::invalid_input(format!(
                "Invalid fleet selector '{s}': no fleet numbers found."
            )));
        }
        Ok(FleetSelector::List(fleets))
    }

    /// Resolve to a concrete ascending, deduplicated fleet sequence within
    /// `[1, fleet_count]`. Any out-of-range fleet is an `InvalidInput` error.
    pub fn resolve(&self, fleet_count: usize) -> Result<Vec<u32>, AppError> {
        match self {
            FleetSelector::All => Ok((1..=fleet_count as u32).collect()),
            FleetSelector::List(fleets) => {
                let mut out = fleets.clone();
                out.sort_unstable();
                out.dedup();
                for &fleet in &out {
                    if fleet == 0 || fleet as usize > fleet_count {
                        return Err(AppError::invalid_input(format!(
                            "Fleet {fleet} is outside the valid range 1..={fleet_count}."
                        )));
                    }
                }
                Ok(out)
            }
        }
    }
}

/// Output of the external dispersion-statistic provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TuningStatistic {
    /// Recommended multiplier on the current variance adjustment.
    pub multiplier: f64,
    /// Lower confidence bound on the multiplier.
    pub low: f64,
    /// Upper confidence bound on the multiplier.
    pub high: f64,
}

/// Per (fleet, type) observation availability flags.
///
/// For age data both flags may be true at once; conditional data then takes
/// priority (a warning, not an error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataAvailability {
    pub has_marginal: bool,
    pub has_conditional: bool,
}

impl DataAvailability {
    pub fn any(self) -> bool {
        self.has_marginal || self.has_conditional
    }
}

/// One row of the tuning table: the recommendation for a single
/// (type, fleet) pair. Missing floats mean "no value" and render as `NA`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningRow {
    /// Variance-adjustment factor code (4 length, 5 age, 7 size-frequency).
    pub factor: u8,
    pub fleet: u32,
    /// Final recommended value, populated per the selected method.
    pub new_var_adj: Option<f64>,
    /// Prior weight from the model output.
    pub old_var_adj: Option<f64>,
    /// Candidate weight under the dispersion method.
    pub new_dispersion: Option<f64>,
    /// Candidate weight under the variance-ratio method.
    pub new_var_ratio: Option<f64>,
    pub dispersion_mult: Option<f64>,
    pub dispersion_lo: Option<f64>,
    pub dispersion_hi: Option<f64>,
    pub var_ratio_mult: Option<f64>,
    /// Data type of this row; `None` for merged size-frequency rows, whose
    /// non-shared columns are all missing.
    pub comp: Option<CompType>,
    pub fleet_name: String,
    pub note: String,
}

impl TuningRow {
    pub fn type_label(&self) -> &'static str {
        match self.comp {
            Some(comp) => comp.label(),
            None => "",
        }
    }
}

/// Ordered, append-only tuning table.
///
/// Rows are built in type-then-fleet order (length for all fleets, then age
/// for all fleets). The `hash` column is a constant `#` marker emitted at
/// render time so a written row can be pasted straight into a model
/// configuration file, with everything after `#` treated as a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningTable {
    pub rows: Vec<TuningRow>,
    /// Decimal digits every floating column was rounded to.
    pub digits: u32,
}

impl TuningTable {
    pub fn new(digits: u32) -> Self {
        Self {
            rows: Vec::new(),
            digits,
        }
    }

    pub fn push(&mut self, row: TuningRow) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Column names in output order. The first name carries the comment
    /// marker so the header itself is paste-compatible.
    pub fn header() -> &'static [&'static str] {
        &[
            "#factor",
            "fleet",
            "New_Var_adj",
            "hash",
            "Old_Var_adj",
            "New_Dispersion",
            "New_VarRatio",
            "Dispersion_mult",
            "Dispersion_lo",
            "Dispersion_hi",
            "VarRatio_mult",
            "Type",
            "Name",
            "Note",
        ]
    }
}

/// Round to a fixed number of decimal digits.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn method_parse_accepts_known_values() {
        assert_eq!(TuneMethod::parse("none").unwrap(), TuneMethod::None);
        assert_eq!(
            TuneMethod::parse("dispersion").unwrap(),
            TuneMethod::Dispersion
        );
        assert_eq!(TuneMethod::parse("var-ratio").unwrap(), TuneMethod::VarRatio);
    }

    #[test]
    fn method_parse_rejects_unknown_value() {
        let err = TuneMethod::parse("bogus").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn fleet_selector_all_resolves_to_full_range() {
        let fleets = FleetSelector::All.resolve(3).unwrap();
        assert_eq!(fleets, vec![1, 2, 3]);
    }

    #[test]
    fn fleet_selector_list_sorts_and_dedupes() {
        let selector = FleetSelector::parse("3, 1,3").unwrap();
        assert_eq!(selector.resolve(3).unwrap(), vec![1, 3]);
    }

    #[test]
    fn fleet_selector_rejects_out_of_range() {
        let selector = FleetSelector::parse("999").unwrap();
        let err = selector.resolve(3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn fleet_selector_rejects_garbage() {
        let err = FleetSelector::parse("1,x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn round_to_digits() {
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(1.23456, 0), 1.0);
        assert!((round_to(0.8, 3) - 0.8).abs() < 1e-12);
    }
}
