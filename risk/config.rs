//! Runtime configuration: which model artifact to serve and which risk
//! thresholds to classify with.
//!
//! Values resolve in the order command-line flag, then config file, then the
//! built-in default.

use crate::classify::{ThresholdError, ThresholdPolicy, Thresholds};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MODEL_PATH: &str = "model.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML config file: {0}")]
    TomlParseError(#[from] toml::de::Error),
    #[error("Invalid risk thresholds: {0}")]
    Thresholds(#[from] ThresholdError),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub model: ModelSection,
    pub thresholds: ThresholdSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelSection {
    pub path: PathBuf,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

/// A policy plus optional overrides of either cut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdSection {
    pub policy: ThresholdPolicy,
    pub low_cut: Option<f64>,
    pub high_cut: Option<f64>,
}

impl ThresholdSection {
    /// Layers command-line choices over this section. `None` keeps the
    /// configured value.
    pub fn overridden_by(
        self,
        policy: Option<ThresholdPolicy>,
        low_cut: Option<f64>,
        high_cut: Option<f64>,
    ) -> Self {
        match policy {
            // A policy named on the command line replaces the configured
            // policy together with any cuts the file pinned.
            Some(policy) => Self {
                policy,
                low_cut,
                high_cut,
            },
            None => Self {
                policy: self.policy,
                low_cut: low_cut.or(self.low_cut),
                high_cut: high_cut.or(self.high_cut),
            },
        }
    }

    pub fn resolve(&self) -> Result<Thresholds, ThresholdError> {
        let base = self.policy.thresholds();
        Thresholds::new(
            self.low_cut.unwrap_or(base.low_cut()),
            self.high_cut.unwrap_or(base.high_cut()),
        )
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.thresholds.resolve()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
