//! Heptathlon leaderboard CLI library.
//!
//! This crate provides the CLI interface for the leaderboard.

mod cli;
pub mod commands;
mod config;

pub use cli::Cli;
pub use config::Config;
