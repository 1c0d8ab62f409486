//! Profilometer Lab Settings Crate
//!
//! Handles lab configuration: measurement timing, display preferences and
//! persistence to JSON or TOML files.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, Config, DisplaySettings, MeasurementSettings, MeasurementSystem,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
