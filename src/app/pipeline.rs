//! Shared "tune pipeline" logic used by the CLI front-end and tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! selector validation -> model-output load -> table build -> optional write
//!
//! The CLI then focuses on presentation (printing the summary and table).

use std::path::PathBuf;

use crate::domain::{FleetSelector, TuneMethod};
use crate::error::AppError;
use crate::io::model::{ModelOutput, load_model_output};
use crate::stats::EmbeddedStatistics;
use crate::tune::{TuneOptions, TuneResult, build_tuning_table};

/// A full run's configuration, with selectors still in user-supplied form.
#[derive(Debug, Clone)]
pub struct TuneConfig {
    pub report: PathBuf,
    pub fleets: String,
    pub method: String,
    pub digits: u32,
    pub write: bool,
}

/// All computed outputs of a single `comptune tune` run.
#[derive(Debug, Clone)]
pub struct TuneRun {
    pub output: ModelOutput,
    pub options: TuneOptions,
    pub result: TuneResult,
}

pub fn tune_config_from_args(args: &crate::cli::TuneArgs) -> TuneConfig {
    TuneConfig {
        report: args.report.clone(),
        fleets: args.fleets.clone(),
        method: args.method.clone(),
        digits: args.digits,
        write: args.write,
    }
}

/// Execute the full tuning pipeline and return the computed outputs.
///
/// Selector validation comes first so bad input fails before any file is
/// touched.
pub fn run_tune(config: &TuneConfig) -> Result<TuneRun, AppError> {
    let method = TuneMethod::parse(&config.method)?;
    let fleets = FleetSelector::parse(&config.fleets)?;

    let output = load_model_output(&config.report)?;

    let options = TuneOptions {
        method,
        fleets,
        digits: config.digits,
        write: config.write,
    };
    let result = build_tuning_table(&output, &EmbeddedStatistics, &options)?;

    Ok(TuneRun {
        output,
        options,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::schema::{Cell, ReportTable};
    use std::fs;

    fn obs_table(fleets: &[u32]) -> ReportTable {
        ReportTable {
            columns: vec!["Fleet".to_string()],
            rows: fleets.iter().map(|&f| vec![Cell::Num(f as f64)]).collect(),
        }
    }

    fn fit_table(rows: &[(u32, f64, f64)]) -> ReportTable {
        ReportTable {
            columns: vec![
                "Fleet".to_string(),
                "Curr_Var_Adj".to_string(),
                "HarMean(effN)/mean(inputN*Adj)".to_string(),
            ],
            rows: rows
                .iter()
                .map(|&(f, adj, mult)| {
                    vec![Cell::Num(f as f64), Cell::Num(adj), Cell::Num(mult)]
                })
                .collect(),
        }
    }

    fn write_report(dir: &std::path::Path) -> PathBuf {
        let output = ModelOutput {
            model_dir: dir.to_path_buf(),
            fleet_names: vec!["FISHERY".to_string()],
            len_comp_fit: Some(fit_table(&[(1, 1.0, 0.8)])),
            age_comp_fit: None,
            len_comp_obs: Some(obs_table(&[1])),
            age_comp_obs: None,
            con_age_obs: None,
            dispersion_len: None,
            dispersion_age: None,
            dispersion_con_age: None,
            size_freq_fit: None,
        };
        let path = dir.join("report.json");
        fs::write(&path, serde_json::to_string(&output).unwrap()).unwrap();
        path
    }

    fn config(report: PathBuf) -> TuneConfig {
        TuneConfig {
            report,
            fleets: "all".to_string(),
            method: "var-ratio".to_string(),
            digits: 3,
            write: false,
        }
    }

    #[test]
    fn pipeline_runs_end_to_end_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let report = write_report(dir.path());

        let run = run_tune(&config(report)).unwrap();
        assert_eq!(run.result.table.len(), 1);
        assert_eq!(run.result.table.rows[0].new_var_adj, Some(0.8));
    }

    #[test]
    fn bogus_method_fails_before_loading_the_report() {
        let mut cfg = config(PathBuf::from("/nonexistent/report.json"));
        cfg.method = "bogus".to_string();
        let err = run_tune(&cfg).unwrap_err();
        // InvalidInput, not the Io error the missing file would raise.
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn write_flag_produces_the_suggested_tuning_file() {
        let dir = tempfile::tempdir().unwrap();
        let report = write_report(dir.path());

        let mut cfg = config(report);
        cfg.write = true;
        let run = run_tune(&cfg).unwrap();

        let path = run.result.written_to.clone().unwrap();
        assert_eq!(path, dir.path().join("suggested_tuning.ss"));
        assert!(path.exists());
    }
}
