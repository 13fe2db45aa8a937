//! Domain types used throughout the tuning pipeline.
//!
//! This module defines:
//!
//! - input selector enums (`CompType`, `TuneMethod`, `FleetSelector`)
//! - the statistic-provider output (`TuningStatistic`)
//! - the output rows and table (`TuningRow`, `TuningTable`)

pub mod types;

pub use types::*;
