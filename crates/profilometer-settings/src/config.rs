//! Configuration for the profilometer lab
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into two sections:
//! - Measurement settings (traverse resolution, sequence timing, seed)
//! - Display settings (precision, progress output, unit system)

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use profilometer_core::MeasurementSystem;
use profilometer_core::{DEFAULT_SAMPLE_COUNT, INITIAL_STYLUS_POSITION};
use profilometer_rig::RigConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "profilometer-lab";
const CONFIG_FILE: &str = "config.toml";

/// Largest precision accepted for printed results
const MAX_DECIMAL_PLACES: usize = 10;

/// Measurement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementSettings {
    /// Samples per traverse
    pub sample_count: usize,
    /// Interval between samples in milliseconds
    pub scan_tick_ms: u64,
    /// Delay before the stylus touches the reference, in milliseconds
    pub zero_engage_delay_ms: u64,
    /// Settle time after touching the reference, in milliseconds
    pub zero_settle_delay_ms: u64,
    /// Stylus parking position
    pub initial_stylus_position: f64,
    /// Fixed seed for reproducible profiles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for MeasurementSettings {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            scan_tick_ms: 60,
            zero_engage_delay_ms: 100,
            zero_settle_delay_ms: 800,
            initial_stylus_position: INITIAL_STYLUS_POSITION,
            seed: None,
        }
    }
}

/// Display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Decimal places for Ra/Rz
    pub decimal_places: usize,
    /// Print sample progress while scanning
    pub show_progress: bool,
    /// Unit system for printed heights
    pub measurement_system: MeasurementSystem,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            decimal_places: 4,
            show_progress: true,
            measurement_system: MeasurementSystem::Metric,
        }
    }
}

/// Complete lab configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Measurement settings
    pub measurement: MeasurementSettings,
    /// Display preferences
    pub display: DisplaySettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, else the default location if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match default_config_path() {
            Ok(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => self.to_toml()?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Render as a TOML document
    pub fn to_toml(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.measurement.scan_tick_ms == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "scan_tick_ms".to_string(),
                value: "0".to_string(),
            });
        }

        if self.display.decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::ValueOutOfRange {
                key: "decimal_places".to_string(),
                value: self.display.decimal_places.to_string(),
            });
        }

        self.to_rig_config().map(|_| ())
    }

    /// Runtime rig configuration for these settings
    pub fn to_rig_config(&self) -> ConfigResult<RigConfig> {
        let m = &self.measurement;
        RigConfig {
            sample_count: m.sample_count,
            scan_tick: Duration::from_millis(m.scan_tick_ms),
            zero_engage_delay: Duration::from_millis(m.zero_engage_delay_ms),
            zero_settle_delay: Duration::from_millis(m.zero_settle_delay_ms),
            initial_stylus_position: m.initial_stylus_position,
        }
        .validated()
        .map_err(|e| ConfigError::InvalidRig(e.to_string()))
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Platform-specific location of the lab config file
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("Could not determine config directory".to_string())
        })
}
