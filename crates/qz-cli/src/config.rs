//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use qz_core::{
    DEFAULT_DECAY_CONSTANT, DEFAULT_TARGET_RETENTION, ForgettingCurve, ModelError,
    RetentionThresholds,
};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Forgetting-curve decay rate per hour.
    pub decay_constant: f64,

    /// Retention level (0-1] at which a topic is due for review.
    pub target_retention: f64,

    /// Topics below this retention percentage are reported at risk.
    pub at_risk_threshold: f64,

    /// Topics at or above this retention percentage are reported mastered.
    pub mastered_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        let thresholds = RetentionThresholds::default();
        Self {
            decay_constant: DEFAULT_DECAY_CONSTANT,
            target_retention: DEFAULT_TARGET_RETENTION,
            at_risk_threshold: thresholds.at_risk_below(),
            mastered_threshold: thresholds.mastered_at(),
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

        // Load from environment variables (QZ_*)
        figment = figment.merge(Env::prefixed("QZ_"));

        figment.extract()
    }

    /// Forgetting-curve parameters, validated.
    pub fn forgetting_curve(&self) -> Result<ForgettingCurve, ModelError> {
        ForgettingCurve::new(self.decay_constant, self.target_retention)
    }

    /// Report classification thresholds, validated.
    pub fn thresholds(&self) -> Result<RetentionThresholds, ModelError> {
        RetentionThresholds::new(self.at_risk_threshold, self.mastered_threshold)
    }
}

/// Returns the platform-specific config directory for qz.
///
/// On Linux: `~/.config/qz`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("qz"))
}
