//! Parsed model-output object and its JSON loader.
//!
//! Parsing the model's native report format is out of scope here; an upstream
//! tool emits the relevant tables as JSON and this module loads that file.
//! The schema is deliberately loose (named-column tables) because the report
//! layout varies across model-software versions; `schema::conventions`
//! resolves the version-dependent columns.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{CompType, DataAvailability};
use crate::error::AppError;
use crate::schema::ReportTable;

/// Everything the tuning builder consumes from one model run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    /// Directory of the model run; `suggested_tuning.ss` is written here.
    pub model_dir: PathBuf,

    /// Fleet display names; index 0 is fleet 1.
    pub fleet_names: Vec<String>,

    /// Per-fleet fit summaries (effective sample sizes, variance adjustments)
    /// for marginal length and age comps. Version-dependent columns.
    #[serde(default)]
    pub len_comp_fit: Option<ReportTable>,
    #[serde(default)]
    pub age_comp_fit: Option<ReportTable>,

    /// Observation registers: one row per composition observation, with a
    /// `Fleet` column. Fleet membership here decides data availability.
    #[serde(default)]
    pub len_comp_obs: Option<ReportTable>,
    #[serde(default)]
    pub age_comp_obs: Option<ReportTable>,
    #[serde(default)]
    pub con_age_obs: Option<ReportTable>,

    /// Precomputed dispersion statistics (`Fleet`, `Mult`, `Lo`, `Hi`), one
    /// table per data layout. Consumed by `stats::EmbeddedStatistics`.
    #[serde(default)]
    pub dispersion_len: Option<ReportTable>,
    #[serde(default)]
    pub dispersion_age: Option<ReportTable>,
    #[serde(default)]
    pub dispersion_con_age: Option<ReportTable>,

    /// Generalized size-frequency fit summary, if that data category exists.
    /// Incompatible with the main table layout; handled as an addendum.
    #[serde(default)]
    pub size_freq_fit: Option<ReportTable>,
}

impl ModelOutput {
    pub fn fleet_count(&self) -> usize {
        self.fleet_names.len()
    }

    /// Display name for a fleet number, empty if unknown.
    pub fn fleet_name(&self, fleet: u32) -> &str {
        self.fleet_names
            .get(fleet.saturating_sub(1) as usize)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Fit-summary table for a data type, if present in the output.
    pub fn comp_fit(&self, comp: CompType) -> Option<&ReportTable> {
        match comp {
            CompType::Length => self.len_comp_fit.as_ref(),
            CompType::Age => self.age_comp_fit.as_ref(),
        }
    }

    /// Observation availability flags for a (type, fleet) pair.
    ///
    /// Conditional age-at-length data only applies to age comps; for length
    /// data `has_conditional` is always false.
    pub fn availability(&self, comp: CompType, fleet: u32) -> DataAvailability {
        let in_table = |t: &Option<ReportTable>| {
            t.as_ref().is_some_and(|t| t.contains_fleet(fleet))
        };
        match comp {
            CompType::Length => DataAvailability {
                has_marginal: in_table(&self.len_comp_obs),
                has_conditional: false,
            },
            CompType::Age => DataAvailability {
                has_marginal: in_table(&self.age_comp_obs),
                has_conditional: in_table(&self.con_age_obs),
            },
        }
    }
}

/// Load a parsed-model-output JSON file.
pub fn load_model_output(path: &Path) -> Result<ModelOutput, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::io(format!(
            "Failed to open model output '{}': {e}",
            path.display()
        ))
    })?;
    let output: ModelOutput = serde_json::from_reader(file).map_err(|e| {
        AppError::io(format!(
            "Invalid model output JSON '{}': {e}",
            path.display()
        ))
    })?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::schema::Cell;
    use std::io::Write;

    fn obs_table(fleets: &[u32]) -> ReportTable {
        ReportTable {
            columns: vec!["Fleet".to_string()],
            rows: fleets.iter().map(|&f| vec![Cell::Num(f as f64)]).collect(),
        }
    }

    fn output() -> ModelOutput {
        ModelOutput {
            model_dir: PathBuf::from("."),
            fleet_names: vec!["FISHERY".to_string(), "SURVEY".to_string()],
            len_comp_fit: None,
            age_comp_fit: None,
            len_comp_obs: Some(obs_table(&[1])),
            age_comp_obs: Some(obs_table(&[1, 2])),
            con_age_obs: Some(obs_table(&[2])),
            dispersion_len: None,
            dispersion_age: None,
            dispersion_con_age: None,
            size_freq_fit: None,
        }
    }

    #[test]
    fn fleet_names_resolve_by_number() {
        let out = output();
        assert_eq!(out.fleet_count(), 2);
        assert_eq!(out.fleet_name(1), "FISHERY");
        assert_eq!(out.fleet_name(2), "SURVEY");
        assert_eq!(out.fleet_name(3), "");
    }

    #[test]
    fn availability_from_observation_tables() {
        let out = output();
        let len1 = out.availability(CompType::Length, 1);
        assert!(len1.has_marginal && !len1.has_conditional);

        let len2 = out.availability(CompType::Length, 2);
        assert!(!len2.any());

        let age2 = out.availability(CompType::Age, 2);
        assert!(age2.has_marginal && age2.has_conditional);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_model_output(Path::new("/nonexistent/report.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn load_roundtrips_json() {
        let out = output();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", serde_json::to_string(&out).unwrap()).unwrap();

        let loaded = load_model_output(&path).unwrap();
        assert_eq!(loaded, out);
    }
}
