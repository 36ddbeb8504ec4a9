//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use heptathlon_core::DuplicatePolicy;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// How duplicate results for one athlete, event and day are resolved.
    pub duplicate_policy: DuplicatePolicy,

    /// Parse records on the rayon pool.
    pub parallel: bool,

    /// Width of the rule lines; scores are right-aligned to this column.
    pub line_width: usize,

    /// chrono format string for day headers.
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::default(),
            parallel: false,
            line_width: 20,
            date_format: "%b %d, %Y".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (HEPT_*)
        figment = figment.merge(Env::prefixed("HEPT_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for hept.
///
/// On Linux: `~/.config/hept`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hept"))
}
