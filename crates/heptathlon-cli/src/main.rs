use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use heptathlon_cli::commands::leaderboard;
use heptathlon_cli::{Cli, Config};

/// Load config and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    if cli.parallel {
        config.parallel = true;
    }
    if let Some(policy) = cli.duplicates {
        config.duplicate_policy = policy;
    }
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout carries only the leaderboard
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = load_config(&cli)?;
    leaderboard::run(&cli.input, &config, cli.json)
}
