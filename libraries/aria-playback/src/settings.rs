//! Player settings
//!
//! Precedence (highest wins):
//! 1) Environment variables (prefix `ARIA__`, `__` as nested separator)
//! 2) Config file (`aria.toml` in the working directory, if present)
//! 3) Struct defaults

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SettingsError};
use crate::types::{PlaybackConfig, PlaybackMode};

/// Default settings file name
pub const SETTINGS_FILE: &str = "aria.toml";

/// Default environment prefix
pub const ENV_PREFIX: &str = "ARIA";

/// Settings applied when a session starts
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Initial volume (0.0-1.0)
    pub volume: f32,

    /// Initial advance policy
    pub mode: PlaybackMode,

    /// Catalog file to queue on start
    pub catalog: Option<PathBuf>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        let config = PlaybackConfig::default();
        Self {
            volume: config.volume,
            mode: config.mode,
            catalog: None,
        }
    }
}

impl PlayerSettings {
    /// Load from `aria.toml` and `ARIA__*` environment variables
    pub fn load() -> Result<Self> {
        Self::load_from(Some(Path::new(SETTINGS_FILE)), ENV_PREFIX)
    }

    /// Load from an optional file and environment variables under `env_prefix`
    ///
    /// A missing file is not an error.
    pub fn load_from(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!("Reading settings from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let settings: PlayerSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if !self.volume.is_finite() || !(0.0..=1.0).contains(&self.volume) {
            return Err(SettingsError::Invalid {
                key: "volume",
                reason: format!("{} is not within 0.0..=1.0", self.volume),
            });
        }
        Ok(())
    }
}

impl From<&PlayerSettings> for PlaybackConfig {
    fn from(settings: &PlayerSettings) -> Self {
        Self {
            volume: settings.volume,
            mode: settings.mode,
        }
    }
}
