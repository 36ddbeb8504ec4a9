//! Performance-to-points conversion.
//!
//! Every discipline uses the same shape of formula,
//! `floor(a * base^c)`, where `base` measures how far the performance is
//! past a reference mark:
//!
//! - track events: `base = b - p` (seconds, lower is better)
//! - field events: `base = p * scale - b` (meters, scaled to centimeters
//!   for the jumps)
//!
//! A negative base has no real-valued power under a fractional exponent, so
//! it is reported as a [`DomainError`] instead of being clamped.

use serde::Serialize;
use thiserror::Error;

use crate::error::{Error, Result};
use crate::event_kind::EventKind;
use crate::record::PerformanceEntry;

/// Which side of the reference mark earns points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Points for finishing under the reference time.
    BelowReference,
    /// Points for clearing or throwing past the reference mark.
    AboveReference,
}

/// Parameters of one event's scoring formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Formula {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// Multiplier applied to the performance before comparing with `b`.
    pub scale: f64,
    pub direction: Direction,
}

impl Formula {
    const fn track(a: f64, b: f64, c: f64) -> Self {
        Self {
            a,
            b,
            c,
            scale: 1.0,
            direction: Direction::BelowReference,
        }
    }

    const fn field(a: f64, b: f64, c: f64, scale: f64) -> Self {
        Self {
            a,
            b,
            c,
            scale,
            direction: Direction::AboveReference,
        }
    }

    /// Distance past the reference mark. Negative when the performance
    /// falls short of it.
    fn base(&self, performance: f64) -> f64 {
        match self.direction {
            Direction::BelowReference => self.b - performance * self.scale,
            Direction::AboveReference => performance * self.scale - self.b,
        }
    }
}

/// A performance outside a formula's valid domain.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{event} performance {performance} is outside the scoring domain")]
pub struct DomainError {
    pub event: EventKind,
    pub performance: f64,
}

/// Immutable set of formulas, one per event.
///
/// Built explicitly and passed to the scoring functions, so a run can use
/// an alternative table without touching shared state.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaTable {
    sprint_100m: Formula,
    sprint_200m: Formula,
    run_800m: Formula,
    high_jump: Formula,
    long_jump: Formula,
    shot_put: Formula,
    javelin: Formula,
}

impl Default for FormulaTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl FormulaTable {
    /// The standard heptathlon scoring table.
    pub const fn standard() -> Self {
        Self {
            sprint_100m: Formula::track(9.230_76, 26.7, 1.835),
            sprint_200m: Formula::track(4.990_87, 42.5, 1.81),
            run_800m: Formula::track(0.111_93, 254.0, 1.88),
            high_jump: Formula::field(1.845_23, 75.0, 1.348, 100.0),
            long_jump: Formula::field(0.188_807, 210.0, 1.41, 100.0),
            shot_put: Formula::field(56.0211, 1.5, 1.05, 1.0),
            javelin: Formula::field(15.9803, 3.8, 1.04, 1.0),
        }
    }

    /// Formula used for `event`.
    pub const fn formula(&self, event: EventKind) -> &Formula {
        match event {
            EventKind::Sprint100m => &self.sprint_100m,
            EventKind::Sprint200m => &self.sprint_200m,
            EventKind::Run800m => &self.run_800m,
            EventKind::HighJump => &self.high_jump,
            EventKind::LongJump => &self.long_jump,
            EventKind::ShotPut => &self.shot_put,
            EventKind::Javelin => &self.javelin,
        }
    }

    /// Returns a copy of the table with the formula for `event` replaced.
    #[must_use]
    pub fn with_formula(mut self, event: EventKind, formula: Formula) -> Self {
        match event {
            EventKind::Sprint100m => self.sprint_100m = formula,
            EventKind::Sprint200m => self.sprint_200m = formula,
            EventKind::Run800m => self.run_800m = formula,
            EventKind::HighJump => self.high_jump = formula,
            EventKind::LongJump => self.long_jump = formula,
            EventKind::ShotPut => self.shot_put = formula,
            EventKind::Javelin => self.javelin = formula,
        }
        self
    }

    /// Points for `performance` in `event`.
    ///
    /// Fails when the base is negative or the points do not fit in a `u32`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn score(&self, event: EventKind, performance: f64) -> Result<u32, DomainError> {
        let formula = self.formula(event);
        let base = formula.base(performance);
        if base.is_nan() || base < 0.0 {
            return Err(DomainError { event, performance });
        }
        let points = (formula.a * base.powf(formula.c)).floor();
        if !points.is_finite() || points < 0.0 || points > f64::from(u32::MAX) {
            return Err(DomainError { event, performance });
        }
        Ok(points as u32)
    }
}

/// A performance together with its points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntry {
    #[serde(flatten)]
    pub entry: PerformanceEntry,
    pub score: u32,
}

/// Scores a single entry.
pub fn score_entry(table: &FormulaTable, entry: PerformanceEntry) -> Result<ScoredEntry> {
    let score = table
        .score(entry.event, entry.performance)
        .map_err(|e| Error::Domain {
            line: entry.line,
            event: e.event,
            performance: e.performance,
        })?;
    tracing::trace!(line = entry.line, event = %entry.event, score, "scored entry");
    Ok(ScoredEntry { entry, score })
}

/// Scores a batch of entries, stopping at the first domain error.
pub fn score_entries(
    table: &FormulaTable,
    entries: Vec<PerformanceEntry>,
) -> Result<Vec<ScoredEntry>> {
    entries
        .into_iter()
        .map(|entry| score_entry(table, entry))
        .collect()
}
