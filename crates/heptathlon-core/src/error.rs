//! Pipeline error type.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::event_kind::EventKind;

/// Errors that abort a leaderboard run.
///
/// Every variant past `Io` carries the 1-based line number of the record
/// that caused it.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record did not have the expected shape or values.
    #[error("line {line}: malformed record {record:?}: {reason}")]
    Parse {
        line: usize,
        record: String,
        reason: String,
    },

    /// The event token is outside the closed set of disciplines.
    #[error("line {line}: unrecognized event {event:?}")]
    UnrecognizedEvent { line: usize, event: String },

    /// The performance lies outside the formula's valid domain.
    #[error("line {line}: {event} performance {performance} is outside the scoring domain")]
    Domain {
        line: usize,
        event: EventKind,
        performance: f64,
    },

    /// A second result for the same athlete, event and day.
    #[error("line {line}: duplicate {event} result for {athlete} on {date}")]
    DuplicateEvent {
        line: usize,
        athlete: String,
        event: EventKind,
        date: NaiveDate,
    },
}

/// Result alias for pipeline operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Line number of the offending record, when there is one.
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Io { .. } => None,
            Self::Parse { line, .. }
            | Self::UnrecognizedEvent { line, .. }
            | Self::Domain { line, .. }
            | Self::DuplicateEvent { line, .. } => Some(*line),
        }
    }
}
