//! Daily aggregation and ranking.
//!
//! Scored entries are grouped by calendar date and then by athlete. Each
//! athlete's per-event points are folded into a daily total, athletes with
//! no points are dropped, and the rest are ranked by descending total.
//! Ties keep the order in which athletes first appeared in the input.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, btree_map};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Error, Result};
use crate::event_kind::EventKind;
use crate::scoring::ScoredEntry;

/// What to do when an athlete has two results for the same event on the
/// same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Abort the run.
    #[default]
    Reject,
    /// Keep the result that appears first in the input.
    KeepFirst,
    /// Keep the result that appears last in the input.
    KeepLast,
    /// Keep the higher-scoring result; the earlier one wins a tie.
    KeepBest,
}

impl DuplicatePolicy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::KeepFirst => "keep_first",
            Self::KeepLast => "keep_last",
            Self::KeepBest => "keep_best",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for an unknown duplicate policy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown duplicate policy {0:?}, expected reject, keep_first, keep_last or keep_best")]
pub struct UnknownDuplicatePolicy(pub String);

impl FromStr for DuplicatePolicy {
    type Err = UnknownDuplicatePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "reject" => Ok(Self::Reject),
            "keep_first" | "first" => Ok(Self::KeepFirst),
            "keep_last" | "last" => Ok(Self::KeepLast),
            "keep_best" | "best" => Ok(Self::KeepBest),
            _ => Err(UnknownDuplicatePolicy(s.to_string())),
        }
    }
}

/// One athlete's points on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAthleteAggregate {
    pub date: NaiveDate,
    pub athlete: String,
    /// Always equal to the sum of `event_scores`. Wider than a single
    /// event score so seven maximal scores cannot overflow.
    pub total_score: u64,
    pub event_scores: BTreeMap<EventKind, u32>,
}

impl DailyAthleteAggregate {
    fn new(date: NaiveDate, athlete: String) -> Self {
        Self {
            date,
            athlete,
            total_score: 0,
            event_scores: BTreeMap::new(),
        }
    }

    fn record(
        &mut self,
        event: EventKind,
        score: u32,
        line: usize,
        policy: DuplicatePolicy,
    ) -> Result<()> {
        match self.event_scores.entry(event) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(score);
            }
            btree_map::Entry::Occupied(mut slot) => {
                tracing::debug!(
                    line,
                    athlete = %self.athlete,
                    %event,
                    date = %self.date,
                    %policy,
                    "duplicate event result"
                );
                match policy {
                    DuplicatePolicy::Reject => {
                        return Err(Error::DuplicateEvent {
                            line,
                            athlete: self.athlete.clone(),
                            event,
                            date: self.date,
                        });
                    }
                    DuplicatePolicy::KeepFirst => {}
                    DuplicatePolicy::KeepLast => {
                        slot.insert(score);
                    }
                    DuplicatePolicy::KeepBest => {
                        if score > *slot.get() {
                            slot.insert(score);
                        }
                    }
                }
            }
        }
        self.total_score = self.event_scores.values().copied().map(u64::from).sum();
        Ok(())
    }
}

/// An athlete's place in a day's ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub athlete: String,
    pub total_score: u64,
    pub event_scores: BTreeMap<EventKind, u32>,
}

impl From<DailyAthleteAggregate> for Standing {
    fn from(aggregate: DailyAthleteAggregate) -> Self {
        Self {
            athlete: aggregate.athlete,
            total_score: aggregate.total_score,
            event_scores: aggregate.event_scores,
        }
    }
}

/// Ranked standings for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardDay {
    pub date: NaiveDate,
    /// Athletes with positive totals, best first.
    pub standings: Vec<Standing>,
}

/// Ranked standings for every day in the input, earliest day first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Leaderboard {
    pub days: Vec<LeaderboardDay>,
}

impl Leaderboard {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Groups scored entries by date, then athlete in first-appearance order.
fn group_by_day(
    entries: Vec<ScoredEntry>,
    policy: DuplicatePolicy,
) -> Result<BTreeMap<NaiveDate, Vec<DailyAthleteAggregate>>> {
    let mut days: BTreeMap<NaiveDate, Vec<DailyAthleteAggregate>> = BTreeMap::new();
    let mut positions: HashMap<(NaiveDate, String), usize> = HashMap::new();

    for ScoredEntry { entry, score } in entries {
        let day = days.entry(entry.date).or_default();
        let idx = *positions
            .entry((entry.date, entry.athlete.clone()))
            .or_insert_with(|| {
                day.push(DailyAthleteAggregate::new(entry.date, entry.athlete.clone()));
                day.len() - 1
            });
        day[idx].record(entry.event, score, entry.line, policy)?;
    }

    Ok(days)
}

/// Folds scored entries into per-day, per-athlete totals.
///
/// Results are ordered by date, then by each athlete's first appearance on
/// that date. Zero totals are kept here; only ranking drops them.
pub fn aggregate(
    entries: Vec<ScoredEntry>,
    policy: DuplicatePolicy,
) -> Result<Vec<DailyAthleteAggregate>> {
    Ok(group_by_day(entries, policy)?
        .into_values()
        .flatten()
        .collect())
}

/// Builds the ranked per-day leaderboard.
///
/// A day whose athletes all scored zero stays in the leaderboard with no
/// standings.
pub fn build_leaderboard(
    entries: Vec<ScoredEntry>,
    policy: DuplicatePolicy,
) -> Result<Leaderboard> {
    let days = group_by_day(entries, policy)?
        .into_iter()
        .map(|(date, aggregates)| {
            let mut standings: Vec<Standing> = aggregates
                .into_iter()
                .filter(|a| a.total_score > 0)
                .map(Standing::from)
                .collect();
            // sort_by_key is stable, so ties keep first-appearance order
            standings.sort_by_key(|s| Reverse(s.total_score));
            LeaderboardDay { date, standings }
        })
        .collect::<Vec<_>>();

    tracing::debug!(days = days.len(), "built leaderboard");
    Ok(Leaderboard { days })
}
