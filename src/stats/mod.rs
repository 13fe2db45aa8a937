//! Dispersion-statistic provider seam.
//!
//! The residual-dispersion tuning formulas are a collaborator, not part of
//! this crate: the builder only needs a multiplier plus confidence bounds per
//! (type, fleet), or "no result" for degenerate cases. Keeping the seam as a
//! trait lets tests drive the builder with handcrafted statistics.

use crate::domain::{CompType, TuningStatistic};
use crate::io::model::ModelOutput;
use crate::schema::ReportTable;

/// External provider of the dispersion-method statistic.
pub trait StatisticProvider {
    /// Statistic for marginal length or age comps of one fleet.
    ///
    /// `None` means no usable result (no data or a degenerate fit); the
    /// builder records that in-row rather than failing.
    fn marginal(&self, output: &ModelOutput, comp: CompType, fleet: u32)
    -> Option<TuningStatistic>;

    /// Statistic for conditional age-at-length comps of one fleet.
    fn conditional(&self, output: &ModelOutput, fleet: u32) -> Option<TuningStatistic>;
}

/// Default provider: reads statistics precomputed upstream and embedded in
/// the model-output object (`dispersion_len` / `dispersion_age` /
/// `dispersion_con_age` tables with `Fleet`, `Mult`, `Lo`, `Hi` columns).
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedStatistics;

impl EmbeddedStatistics {
    fn from_table(table: Option<&ReportTable>, fleet: u32) -> Option<TuningStatistic> {
        let table = table?;
        let row = (0..table.rows.len()).find(|&r| table.fleet_of_row(r) == Some(fleet))?;
        let multiplier = table.cell(row, "Mult")?.as_f64()?;
        let low = table.cell(row, "Lo")?.as_f64()?;
        let high = table.cell(row, "Hi")?.as_f64()?;
        Some(TuningStatistic {
            multiplier,
            low,
            high,
        })
    }
}

impl StatisticProvider for EmbeddedStatistics {
    fn marginal(
        &self,
        output: &ModelOutput,
        comp: CompType,
        fleet: u32,
    ) -> Option<TuningStatistic> {
        let table = match comp {
            CompType::Length => output.dispersion_len.as_ref(),
            CompType::Age => output.dispersion_age.as_ref(),
        };
        Self::from_table(table, fleet)
    }

    fn conditional(&self, output: &ModelOutput, fleet: u32) -> Option<TuningStatistic> {
        Self::from_table(output.dispersion_con_age.as_ref(), fleet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Cell;
    use std::path::PathBuf;

    fn stat_table(rows: &[(u32, f64, f64, f64)]) -> ReportTable {
        ReportTable {
            columns: ["Fleet", "Mult", "Lo", "Hi"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows: rows
                .iter()
                .map(|&(f, m, lo, hi)| {
                    vec![
                        Cell::Num(f as f64),
                        Cell::Num(m),
                        Cell::Num(lo),
                        Cell::Num(hi),
                    ]
                })
                .collect(),
        }
    }

    fn output() -> ModelOutput {
        ModelOutput {
            model_dir: PathBuf::from("."),
            fleet_names: vec!["FISHERY".to_string()],
            len_comp_fit: None,
            age_comp_fit: None,
            len_comp_obs: None,
            age_comp_obs: None,
            con_age_obs: None,
            dispersion_len: Some(stat_table(&[(1, 1.25, 1.1, 1.4)])),
            dispersion_age: None,
            dispersion_con_age: Some(stat_table(&[(1, 0.9, 0.7, 1.2)])),
            size_freq_fit: None,
        }
    }

    #[test]
    fn reads_marginal_statistic_from_embedded_table() {
        let out = output();
        let stat = EmbeddedStatistics
            .marginal(&out, CompType::Length, 1)
            .unwrap();
        assert_eq!(stat.multiplier, 1.25);
        assert_eq!(stat.low, 1.1);
        assert_eq!(stat.high, 1.4);
    }

    #[test]
    fn missing_table_or_fleet_yields_no_result() {
        let out = output();
        assert!(EmbeddedStatistics.marginal(&out, CompType::Age, 1).is_none());
        assert!(
            EmbeddedStatistics
                .marginal(&out, CompType::Length, 2)
                .is_none()
        );
    }

    #[test]
    fn conditional_reads_its_own_table() {
        let out = output();
        let stat = EmbeddedStatistics.conditional(&out, 1).unwrap();
        assert_eq!(stat.multiplier, 0.9);
    }

    #[test]
    fn null_cells_yield_no_result() {
        let mut out = output();
        let table = out.dispersion_len.as_mut().unwrap();
        table.rows[0][1] = Cell::Null;
        assert!(
            EmbeddedStatistics
                .marginal(&out, CompType::Length, 1)
                .is_none()
        );
    }
}
