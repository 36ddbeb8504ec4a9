//! Core domain logic for the heptathlon leaderboard.
//!
//! This crate contains the fundamental types and logic for:
//! - Records: loading a result file and parsing each line
//! - Scoring: converting performances to points with an explicit formula table
//! - Leaderboard: per-day aggregation and stable ranking

mod error;
pub mod event_kind;
pub mod leaderboard;
mod pipeline;
pub mod record;
pub mod scoring;

pub use error::{Error, Result};
pub use event_kind::{EventKind, UnknownEventKind};
pub use leaderboard::{
    DailyAthleteAggregate, DuplicatePolicy, Leaderboard, LeaderboardDay, Standing, aggregate,
    build_leaderboard,
};
pub use pipeline::Pipeline;
pub use record::{PerformanceEntry, RawRecord, load_records, parse_record, split_records};
pub use scoring::{DomainError, Formula, FormulaTable, ScoredEntry, score_entry};
