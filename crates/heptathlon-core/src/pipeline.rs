//! End-to-end run: load, parse, score, rank.

use std::path::Path;

use crate::error::Result;
use crate::leaderboard::{DuplicatePolicy, Leaderboard, build_leaderboard};
use crate::record::{RawRecord, load_records, parse_records, split_records};
use crate::scoring::{FormulaTable, score_entries};

/// Settings for one leaderboard run.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub formulas: FormulaTable,
    pub duplicate_policy: DuplicatePolicy,
    /// Parse records on the rayon pool.
    pub parallel: bool,
}

impl Pipeline {
    /// Runs the pipeline over a file. The file is read in full before any
    /// record is parsed.
    pub fn run_path(&self, path: &Path) -> Result<Leaderboard> {
        let records = load_records(path)?;
        self.run_records(&records)
    }

    /// Runs the pipeline over in-memory text.
    pub fn run_str(&self, content: &str) -> Result<Leaderboard> {
        self.run_records(&split_records(content))
    }

    fn run_records(&self, records: &[RawRecord]) -> Result<Leaderboard> {
        let entries = parse_records(records, self.parallel)?;
        tracing::debug!(entries = entries.len(), parallel = self.parallel, "parsed records");

        let scored = score_entries(&self.formulas, entries)?;
        tracing::debug!(scored = scored.len(), "scored entries");

        build_leaderboard(scored, self.duplicate_policy)
    }
}
