//! Structured diagnostics channel.
//!
//! Non-fatal conditions (ambiguous age data, a fleet with no usable
//! dispersion statistic, the size-frequency addendum) are collected here and
//! returned alongside the tuning table, so callers can inspect which fleets
//! triggered fallback behavior without parsing free-text notes. Each warning
//! is also mirrored to `tracing::warn!` for interactive use.

use crate::domain::CompType;

/// A single non-fatal condition raised while building the tuning table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A fleet has both marginal and conditional age observations.
    /// Conditional data takes priority.
    AmbiguousAgeData { fleet: u32 },
    /// The dispersion-method provider returned no usable result for this
    /// fleet/type; the row carries a note and missing multiplier/bounds.
    MissingStatistic { comp: CompType, fleet: u32 },
    /// Generalized size-frequency data is present but has no
    /// dispersion-method support and an incompatible column layout.
    SizeFreqUnsupported,
}

impl Warning {
    pub fn message(&self) -> String {
        match self {
            Warning::AmbiguousAgeData { fleet } => format!(
                "Fleet {fleet} has both marginal and conditional age data; using conditional data."
            ),
            Warning::MissingStatistic { comp, fleet } => format!(
                "No dispersion statistic for {} data, fleet {fleet}.",
                comp.label()
            ),
            Warning::SizeFreqUnsupported => {
                "Generalized size-frequency data found; dispersion tuning is not supported \
                 for it and its column layout differs from the main table."
                    .to_string()
            }
        }
    }
}

/// Ordered collection of warnings raised during one builder invocation.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and mirror it to the log.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message());
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }
}
