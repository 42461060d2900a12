//! # Settings Module
//!
//! ## Purpose
//! Options of the contribution analysis, kept in one serializable structure so they can be
//! stored in a JSON file next to the calculation and reloaded later.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "substance_keys": ["H2O", "OH-"],
//!   "total": true,
//!   "threshold": 1e-9,
//!   "relative": false,
//!   "combine_equilibria": true,
//!   "log_level": "info"
//! }
//! ```
//! Missing fields take their default values, a missing file gives the default settings.
//!
//! ## Usage Pattern
//! ```rust
//! use KiReact::settings::ContributionSettings;
//!
//! let settings = ContributionSettings::default()
//!     .with_threshold(1e-6)
//!     .with_combine_equilibria(true);
//! assert_eq!(settings.threshold, 1e-6);
//! ```

use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "contribution_settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings file '{path}' cannot be read or written: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Settings file '{path}' is not valid: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Unknown log level: {0}")]
    LogLevel(String),
}

/// Options of `reaction_contributions` and `dominant_reactions`.
///
/// # Fields
/// * `substance_keys` - substances to analyse, all substances of the system when `None`
/// * `total` - report the total rate of change along with the contributions
/// * `threshold` - contributions below it in magnitude at every step are not reported
/// * `relative` - divide rates by the concentration of the substance
/// * `combine_equilibria` - report forward/backward pairs as one equilibrium
/// * `log_level` - level of the terminal logger of the binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionSettings {
    pub substance_keys: Option<Vec<String>>,
    pub total: bool,
    pub threshold: f64,
    pub relative: bool,
    pub combine_equilibria: bool,
    pub log_level: String,
}

impl Default for ContributionSettings {
    fn default() -> Self {
        Self {
            substance_keys: None,
            total: false,
            threshold: 1e-9,
            relative: false,
            combine_equilibria: false,
            log_level: "info".to_string(),
        }
    }
}

impl ContributionSettings {
    pub fn with_substance_keys(mut self, keys: &[&str]) -> Self {
        self.substance_keys = Some(keys.iter().map(|k| k.to_string()).collect());
        self
    }

    pub fn with_total(mut self, total: bool) -> Self {
        self.total = total;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_relative(mut self, relative: bool) -> Self {
        self.relative = relative;
        self
    }

    pub fn with_combine_equilibria(mut self, combine: bool) -> Self {
        self.combine_equilibria = combine;
        self
    }

    /// Loads settings from a JSON file.
    pub fn load_config(path: &str) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Loads settings from a JSON file, defaults when the file is absent or broken.
    pub fn load_or_default(path: &str) -> Self {
        if !Path::new(path).exists() {
            return Self::default();
        }
        match Self::load_config(path) {
            Ok(settings) => {
                info!("settings loaded from {}", path);
                settings
            }
            Err(e) => {
                warn!("{}; default settings are used", e);
                Self::default()
            }
        }
    }

    /// Saves settings as pretty-printed JSON.
    pub fn save_config(&self, path: &str) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_string(),
            source,
        })?;
        fs::write(path, content).map_err(|source| SettingsError::Io {
            path: path.to_string(),
            source,
        })
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter, SettingsError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| SettingsError::LogLevel(self.log_level.clone()))
    }
}
