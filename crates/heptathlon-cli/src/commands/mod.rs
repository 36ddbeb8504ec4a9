//! CLI command implementations.

pub mod leaderboard;
