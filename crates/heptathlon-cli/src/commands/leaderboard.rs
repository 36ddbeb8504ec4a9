//! Leaderboard command: score a result file and print each day's ranking.
//!
//! Output is either fixed-width console text (one block per day) or JSON.

use std::fmt::Write;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use heptathlon_core::{FormulaTable, Leaderboard, Pipeline, Standing};
use serde::Serialize;

use crate::config::Config;

/// Layout settings for the text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub line_width: usize,
    pub date_format: String,
}

impl RenderOptions {
    /// Builds render options from config, rejecting date formats chrono
    /// cannot render for a bare calendar date (including time-of-day and
    /// offset fields).
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut sample = String::new();
        if write!(sample, "{}", NaiveDate::MIN.format(&config.date_format)).is_err() {
            anyhow::bail!("invalid date_format {:?}", config.date_format);
        }
        Ok(Self {
            line_width: config.line_width,
            date_format: config.date_format.clone(),
        })
    }
}

// ========== Text Output ==========

/// Formats one ranked athlete: upper-cased name, score right-aligned at
/// `width`. A name that does not fit is followed by a single space.
fn format_standing(standing: &Standing, width: usize) -> String {
    let name = standing.athlete.to_uppercase();
    let score = standing.total_score.to_string();
    let name_width = width.saturating_sub(score.len());

    if name.chars().count() < name_width {
        format!("{name:<name_width$}{score}")
    } else {
        format!("{name} {score}")
    }
}

/// Formats the human-readable leaderboard.
pub fn format_leaderboard(board: &Leaderboard, options: &RenderOptions) -> String {
    let mut output = String::new();
    let rule = "=".repeat(options.line_width);

    for (idx, day) in board.days.iter().enumerate() {
        if idx > 0 {
            writeln!(output).unwrap();
        }
        writeln!(output, "{rule}").unwrap();
        writeln!(
            output,
            "Day {}: {}",
            idx + 1,
            day.date.format(&options.date_format)
        )
        .unwrap();
        writeln!(output, "{rule}").unwrap();

        for standing in &day.standings {
            writeln!(output, "{}", format_standing(standing, options.line_width)).unwrap();
        }
    }

    output
}

// ========== JSON Output ==========

/// JSON leaderboard structure.
#[derive(Debug, Serialize)]
pub struct JsonLeaderboard<'a> {
    pub days: Vec<JsonDay<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonDay<'a> {
    /// 1-based position of the day, matching the text headers.
    pub day: usize,
    pub date: NaiveDate,
    pub standings: &'a [Standing],
}

/// Formats the leaderboard as JSON.
pub fn format_leaderboard_json(board: &Leaderboard) -> Result<String> {
    let report = JsonLeaderboard {
        days: board
            .days
            .iter()
            .enumerate()
            .map(|(idx, day)| JsonDay {
                day: idx + 1,
                date: day.date,
                standings: &day.standings,
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Builds the leaderboard from a file, or from standard input when `input`
/// is `-`.
pub fn build(input: &Path, config: &Config) -> Result<Leaderboard> {
    let pipeline = Pipeline {
        formulas: FormulaTable::standard(),
        duplicate_policy: config.duplicate_policy,
        parallel: config.parallel,
    };

    if input == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read standard input")?;
        pipeline
            .run_str(&content)
            .context("failed to build leaderboard from standard input")
    } else {
        pipeline
            .run_path(input)
            .with_context(|| format!("failed to build leaderboard from {}", input.display()))
    }
}

/// Runs the leaderboard command.
///
/// Nothing is printed unless the whole input was processed.
pub fn run(input: &Path, config: &Config, json: bool) -> Result<()> {
    let options = RenderOptions::from_config(config)?;
    let board = build(input, config)?;
    if board.is_empty() {
        tracing::info!(input = %input.display(), "no records, nothing to print");
    } else {
        tracing::debug!(days = board.days.len(), "leaderboard ready");
    }

    if json {
        let output = format_leaderboard_json(&board)?;
        println!("{output}");
    } else {
        let output = format_leaderboard(&board, &options);
        print!("{output}");
    }

    Ok(())
}
