//! Optional `checker.ron` configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use checker_core::{AnalysisKind, Profiles};
use checker_engine::{BackendSettings, Mode, DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
use engine_logging::engine_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "checker.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Overrides for one kind's progress heuristics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOverride {
    pub total_steps: Option<u32>,
    pub nominal_duration_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub base_url: String,
    pub language: String,
    pub mode: Mode,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub single: ProfileOverride,
    pub batch: ProfileOverride,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        let defaults = BackendSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            mode: Mode::Streaming,
            connect_timeout_ms: defaults.connect_timeout.as_millis() as u64,
            read_timeout_ms: defaults.read_timeout.as_millis() as u64,
            request_timeout_ms: defaults.request_timeout.as_millis() as u64,
            single: ProfileOverride::default(),
            batch: ProfileOverride::default(),
        }
    }
}

impl CheckerConfig {
    pub fn to_settings(&self) -> BackendSettings {
        let mut profiles = Profiles::default();
        for (kind, overrides) in [
            (AnalysisKind::Single, &self.single),
            (AnalysisKind::Batch, &self.batch),
        ] {
            let profile = profiles.get_mut(kind);
            if let Some(total_steps) = overrides.total_steps {
                profile.total_steps = total_steps.max(1);
            }
            if let Some(ms) = overrides.nominal_duration_ms {
                profile.nominal_duration = Duration::from_millis(ms.max(1));
            }
        }

        BackendSettings {
            base_url: self.base_url.clone(),
            language: self.language.clone(),
            mode: self.mode,
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            read_timeout: Duration::from_millis(self.read_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            profiles,
        }
    }
}

/// Loads `explicit` if given, else `./checker.ron` when present, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<CheckerConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(CONFIG_FILENAME);
            if !default_path.exists() {
                return Ok(CheckerConfig::default());
            }
            default_path
        }
    };

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    engine_info!("Loaded configuration from {:?}", path);
    Ok(config)
}
