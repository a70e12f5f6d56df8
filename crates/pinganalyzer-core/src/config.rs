//! Analysis configuration
//!
//! Optional JSON file controlling the autocorrelation lag span and how
//! run lengths treat a run that reaches the end of the log.

use crate::stats::runs::RunBoundary;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading or writing a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn default_max_lag() -> u32 {
    crate::DEFAULT_MAX_LAG
}

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Autocorrelation is reported for lags `-max_lag..=max_lag`
    #[serde(default = "default_max_lag")]
    pub max_lag: u32,
    /// Whether summaries count a run still open at the end of the log
    #[serde(default)]
    pub run_boundary: RunBoundary,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_lag: default_max_lag(),
            run_boundary: RunBoundary::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Read and parse a config file
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a config file, analysing with defaults if it is unusable
    ///
    /// A bad config never stops the analysis; the reason is logged instead.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => {
                tracing::debug!(
                    path = %path.display(),
                    max_lag = config.max_lag,
                    run_boundary = ?config.run_boundary,
                    "Loaded analyzer config"
                );
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "Analyzing with default settings");
                Self::default()
            }
        }
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(write_err)
    }
}
