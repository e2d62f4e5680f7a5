//! Settings file for the countdown clock.
//!
//! An optional JSON file providing defaults for the `run` command:
//!
//! ```json
//! {
//!   "interval": "05:00",
//!   "delay": "01:30",
//!   "sound": "/home/me/sounds/beep.wav",
//!   "tone_ms": 800,
//!   "muted": false
//! }
//! ```
//!
//! Every field is optional. Command line flags take precedence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::TimeDuration;

/// Directory name under the user's config directory.
const APP_DIR: &str = "countdown-clock";

/// Settings file name.
const FILE_NAME: &str = "config.json";

/// Errors raised while loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("failed to read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid settings JSON.
    #[error("failed to parse settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Defaults for a clock run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Time between two cues
    pub interval: Option<TimeDuration>,
    /// Countdown before the first cue completes
    pub delay: Option<TimeDuration>,
    /// Sound file used as the cue
    pub sound: Option<PathBuf>,
    /// Length of the generated tone when no sound file is set
    pub tone_ms: Option<u64>,
    /// Never play the cue
    pub muted: bool,
}

impl Settings {
    /// Returns the default settings location
    /// (`<config dir>/countdown-clock/config.json`).
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Loads settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Loads settings from an explicit path, or from the default location
    /// if a file exists there.
    ///
    /// An explicit path must exist; a missing default file yields the
    /// default settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the chosen file cannot be read or parsed.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No settings file, using defaults");
                Ok(Self::default())
            }
        }
    }
}
