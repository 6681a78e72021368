//! Configuration loading and management.

use std::path::{Path, PathBuf};

use em_core::{DisplayMode, Interval, IntervalError, OrderMode};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ordering applied by `labels` when `--order` is not given.
    pub order: OrderMode,

    /// Label text used by `labels` when `--display` is not given.
    pub display: DisplayMode,

    /// Interval slots per generalized episode.
    pub dimension: usize,

    /// Duration windows as `LOW-HIGH` strings.
    pub intervals: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            order: OrderMode::OnsetTime,
            display: DisplayMode::Name,
            dimension: 1,
            intervals: Vec::new(),
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

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (EM_*)
        figment = figment.merge(Env::prefixed("EM_"));

        figment.extract()
    }

    /// Parses the configured intervals.
    pub fn intervals(&self) -> Result<Vec<Interval>, IntervalError> {
        self.intervals.iter().map(|s| s.parse()).collect()
    }
}

/// Returns the platform-specific config directory for em.
///
/// On Linux: `~/.config/em`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("em"))
}
