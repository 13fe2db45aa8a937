//! Generic report-table representation.
//!
//! Model-output report tables differ across model-software versions, so we
//! keep them as string-named columns plus rows of loosely typed cells and let
//! `conventions` decide which columns carry the fields we need.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Name of the fleet-number column, stable across all known schema versions.
pub const FLEET_COLUMN: &str = "Fleet";

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Num(f64),
    Text(String),
    Null,
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Num(v) => Some(*v),
            Cell::Text(_) | Cell::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

/// A named-column table as produced by the upstream model-output parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at (row, named column), if both exist.
    pub fn cell(&self, row: usize, name: &str) -> Option<&Cell> {
        let col = self.column_index(name)?;
        self.rows.get(row)?.get(col)
    }

    /// Fleet number of a row, if the fleet cell holds a whole number.
    pub fn fleet_of_row(&self, row: usize) -> Option<u32> {
        let v = self.cell(row, FLEET_COLUMN)?.as_f64()?;
        if v.fract() == 0.0 && v >= 0.0 {
            Some(v as u32)
        } else {
            None
        }
    }

    /// Whether any row belongs to the given fleet.
    pub fn contains_fleet(&self, fleet: u32) -> bool {
        (0..self.rows.len()).any(|r| self.fleet_of_row(r) == Some(fleet))
    }

    /// Index of the single row for a fleet.
    ///
    /// The lookup must resolve to exactly one row; zero or several rows mean
    /// the table is malformed and the whole call aborts.
    pub fn fleet_row(&self, fleet: u32) -> Result<usize, AppError> {
        if !self.has_column(FLEET_COLUMN) {
            return Err(AppError::output_format(format!(
                "Report table has no '{FLEET_COLUMN}' column; model output format too old."
            )));
        }
        let matches: Vec<usize> = (0..self.rows.len())
            .filter(|&r| self.fleet_of_row(r) == Some(fleet))
            .collect();
        match matches.as_slice() {
            [row] => Ok(*row),
            [] => Err(AppError::output_format(format!(
                "Report table has no row for fleet {fleet}; model output is missing required values."
            ))),
            _ => Err(AppError::output_format(format!(
                "Report table has {} rows for fleet {fleet}; expected exactly one.",
                matches.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn table() -> ReportTable {
        ReportTable {
            columns: vec!["Fleet".to_string(), "Value".to_string()],
            rows: vec![
                vec![Cell::Num(1.0), Cell::Num(10.0)],
                vec![Cell::Num(2.0), Cell::Null],
            ],
        }
    }

    #[test]
    fn cell_accessors() {
        assert_eq!(Cell::Num(1.5).as_f64(), Some(1.5));
        assert_eq!(Cell::Text("x".to_string()).as_f64(), None);
        assert!(Cell::Null.is_null());
    }

    #[test]
    fn fleet_row_resolves_single_match() {
        let t = table();
        assert_eq!(t.fleet_row(2).unwrap(), 1);
        assert_eq!(t.cell(0, "Value").unwrap().as_f64(), Some(10.0));
    }

    #[test]
    fn fleet_row_missing_fleet_is_format_error() {
        let err = table().fleet_row(3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutputFormat);
    }

    #[test]
    fn fleet_row_duplicate_fleet_is_format_error() {
        let mut t = table();
        t.rows.push(vec![Cell::Num(1.0), Cell::Num(11.0)]);
        let err = t.fleet_row(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutputFormat);
    }

    #[test]
    fn contains_fleet_checks_membership() {
        let t = table();
        assert!(t.contains_fleet(1));
        assert!(!t.contains_fleet(9));
    }

    #[test]
    fn cell_json_roundtrip() {
        let t = table();
        let json = serde_json::to_string(&t).unwrap();
        let back: ReportTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
