//! Record loading and parsing.
//!
//! Input is a flat comma-separated file, one performance per line:
//!
//! ```text
//! athlete,event,performance,date[ time]
//! ```
//!
//! Loading splits the file into trimmed, non-blank records that remember
//! their physical line number. Parsing turns each record into a
//! [`PerformanceEntry`] whose performance is already a plain magnitude in
//! the scoring unit (seconds or meters) and whose date has been truncated
//! to a calendar day.

use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::event_kind::EventKind;

/// `minutes:seconds`, e.g. `2:10.3`.
static CLOCK_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+):(\d+(?:\.\d*)?)$").unwrap());

/// Plain decimal with an optional unit suffix, e.g. `14.5`, `6.02m`, `13.1 s`.
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d*)?|\.\d+)\s*[A-Za-z]*$").unwrap());

/// One non-blank input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based physical line number in the source.
    pub line: usize,
    /// Line content with surrounding whitespace removed.
    pub text: String,
}

/// A parsed, normalized performance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceEntry {
    pub line: usize,
    /// Lower-cased athlete name.
    pub athlete: String,
    pub event: EventKind,
    /// Seconds for track events, meters for field events.
    pub performance: f64,
    pub date: NaiveDate,
}

/// Reads `path` and splits it into records.
///
/// The whole file is read before anything is returned, so an unreadable
/// file fails before any parsing starts.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = split_records(&content);
    tracing::debug!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

/// Splits text into trimmed, non-blank records in original order.
pub fn split_records(content: &str) -> Vec<RawRecord> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let text = line.trim();
            (!text.is_empty()).then(|| RawRecord {
                line: idx + 1,
                text: text.to_string(),
            })
        })
        .collect()
}

/// Parses a batch of records, preserving input order.
///
/// With `parallel` set the records are parsed on the rayon pool. Either way
/// the returned error belongs to the earliest failing line.
pub fn parse_records(records: &[RawRecord], parallel: bool) -> Result<Vec<PerformanceEntry>> {
    if parallel {
        let results: Vec<Result<PerformanceEntry>> =
            records.par_iter().map(parse_record).collect();
        results.into_iter().collect()
    } else {
        records.iter().map(parse_record).collect()
    }
}

/// Parses one record into a [`PerformanceEntry`].
pub fn parse_record(record: &RawRecord) -> Result<PerformanceEntry> {
    let malformed = |reason: String| Error::Parse {
        line: record.line,
        record: record.text.clone(),
        reason,
    };

    let fields: Vec<&str> = record.text.split(',').map(str::trim).collect();
    let [athlete, event, performance, date] = fields.as_slice() else {
        return Err(malformed(format!(
            "expected 4 comma-separated fields, found {}",
            fields.len()
        )));
    };

    if athlete.is_empty() {
        return Err(malformed("athlete name is empty".to_string()));
    }
    let athlete = athlete.to_lowercase();

    let event: EventKind = event
        .to_lowercase()
        .parse()
        .map_err(|_| Error::UnrecognizedEvent {
            line: record.line,
            event: (*event).to_string(),
        })?;

    let performance = parse_performance(performance).map_err(malformed)?;

    let date = normalize_date(date)
        .ok_or_else(|| malformed(format!("invalid date {date:?}")))?;

    tracing::trace!(line = record.line, %athlete, %event, performance, %date, "parsed record");

    Ok(PerformanceEntry {
        line: record.line,
        athlete,
        event,
        performance,
        date,
    })
}

/// Converts a performance field to a plain number.
///
/// `M:SS.s` becomes total seconds; anything else must be a non-negative
/// decimal, optionally followed by a unit suffix which is dropped.
pub fn parse_performance(value: &str) -> Result<f64, String> {
    let parsed = if value.contains(':') {
        let caps = CLOCK_TIME_RE
            .captures(value)
            .ok_or_else(|| format!("invalid time {value:?}, expected minutes:seconds"))?;
        let minutes: f64 = caps[1]
            .parse()
            .map_err(|_| format!("invalid minutes in {value:?}"))?;
        let seconds: f64 = caps[2]
            .parse()
            .map_err(|_| format!("invalid seconds in {value:?}"))?;
        if seconds >= 60.0 {
            return Err(format!("seconds out of range in {value:?}"));
        }
        minutes.mul_add(60.0, seconds)
    } else {
        let caps = DECIMAL_RE
            .captures(value)
            .ok_or_else(|| format!("invalid performance {value:?}"))?;
        caps[1]
            .parse()
            .map_err(|_| format!("invalid performance {value:?}"))?
    };

    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(format!("performance {value:?} is not finite"))
    }
}

/// Truncates a date or timestamp field to its calendar date.
///
/// Only the first whitespace-delimited token is considered, so any trailing
/// time of day is discarded before parsing.
pub fn normalize_date(value: &str) -> Option<NaiveDate> {
    let token = value.split_whitespace().next()?;

    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(token, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(token)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
