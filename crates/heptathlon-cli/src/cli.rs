//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;
use heptathlon_core::DuplicatePolicy;

/// Daily heptathlon leaderboard.
///
/// Reads `athlete,event,performance,date` records, scores every performance
/// and prints each day's ranking.
#[derive(Debug, Parser)]
#[command(name = "hept", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the leaderboard as JSON.
    #[arg(long)]
    pub json: bool,

    /// Parse records in parallel.
    #[arg(long)]
    pub parallel: bool,

    /// How to resolve two results for the same athlete, event and day
    /// (reject, keep_first, keep_last, keep_best).
    #[arg(long, value_name = "POLICY")]
    pub duplicates: Option<DuplicatePolicy>,

    /// Result file to read, or `-` for standard input.
    pub input: PathBuf,
}
