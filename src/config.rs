//! Application configuration.
//!
//! Settings come from three layers, lowest priority first: built-in
//! defaults, an optional JSON file, and command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::driver::DEFAULT_FRAME_RATE;
use crate::sound::{
    Tone, DEFAULT_FREQUENCY_HZ, DEFAULT_INTERVAL_MS, DEFAULT_PULSES, DEFAULT_PULSE_MS,
    DEFAULT_VOLUME,
};

fn default_true() -> bool {
    true
}

fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

fn default_pulses() -> u32 {
    DEFAULT_PULSES
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

fn default_frequency_hz() -> f32 {
    DEFAULT_FREQUENCY_HZ
}

fn default_pulse_ms() -> u64 {
    DEFAULT_PULSE_MS
}

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON.
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings for the completion alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Number of beeps.
    #[serde(default = "default_pulses")]
    pub pulses: u32,

    /// Milliseconds between the starts of consecutive beeps.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Beep pitch.
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: f32,

    /// Audible length of each beep in milliseconds.
    #[serde(default = "default_pulse_ms")]
    pub pulse_ms: u64,

    /// Beep amplitude (0.0 - 1.0).
    #[serde(default = "default_volume")]
    pub volume: f32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            pulses: default_pulses(),
            interval_ms: default_interval_ms(),
            frequency_hz: default_frequency_hz(),
            pulse_ms: default_pulse_ms(),
            volume: default_volume(),
        }
    }
}

impl AlertConfig {
    /// The tone described by these settings.
    pub fn tone(&self) -> Tone {
        Tone::new(
            self.frequency_hz,
            Duration::from_millis(self.pulse_ms),
            self.volume,
        )
    }

    /// Spacing between beeps.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Top-level configuration.
///
/// # Example
///
/// ```
/// use segment_timer::config::AppConfig;
///
/// let config: AppConfig = serde_json::from_str(r#"{ "minutes": 3 }"#).unwrap();
/// assert_eq!(config.minutes, 3);
/// assert_eq!(config.seconds, 0);
/// assert!(config.sound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Initial minutes input, applied at startup.
    #[serde(default)]
    pub minutes: u32,

    /// Initial seconds input, applied at startup.
    #[serde(default)]
    pub seconds: u32,

    /// Whether the completion alert makes a sound.
    #[serde(default = "default_true")]
    pub sound: bool,

    /// Completion alert settings.
    #[serde(default)]
    pub alert: AlertConfig,

    /// Display refresh rate while the countdown runs.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Whether the controls bar is shown at startup.
    #[serde(default = "default_true")]
    pub show_controls: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            minutes: 0,
            seconds: 0,
            sound: default_true(),
            alert: AlertConfig::default(),
            frame_rate: default_frame_rate(),
            show_controls: default_true(),
        }
    }
}

impl AppConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads from `path` when given, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the given file cannot be loaded.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(minutes) = overrides.minutes {
            self.minutes = minutes;
        }
        if let Some(seconds) = overrides.seconds {
            self.seconds = seconds;
        }
        if overrides.no_sound {
            self.sound = false;
        }
        if let Some(pulses) = overrides.pulses {
            self.alert.pulses = pulses;
        }
        if let Some(fps) = overrides.frame_rate {
            self.frame_rate = fps;
        }
        if overrides.hide_controls {
            self.show_controls = false;
        }
        self
    }
}

/// Values supplied on the command line; `None`/`false` leaves the
/// lower layers untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub minutes: Option<u32>,
    pub seconds: Option<u32>,
    pub no_sound: bool,
    pub pulses: Option<u32>,
    pub frame_rate: Option<u32>,
    pub hide_controls: bool,
}
