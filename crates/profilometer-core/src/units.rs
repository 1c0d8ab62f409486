//! Unit formatting for roughness values
//!
//! Heights are carried internally in micrometres. Imperial display uses
//! microinches, the customary unit for surface finish callouts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Microinches per micrometre
pub const MICROINCHES_PER_MICROMETRE: f64 = 1.0 / 0.0254;

/// Measurement system used when presenting results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Micrometres (µm)
    #[default]
    Metric,
    /// Microinches (µin)
    Imperial,
}

impl MeasurementSystem {
    /// Unit suffix for heights in this system
    pub fn height_unit(&self) -> &'static str {
        match self {
            Self::Metric => "µm",
            Self::Imperial => "µin",
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "um" | "µm" => Ok(Self::Metric),
            "imperial" | "uin" | "µin" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Format a height in micrometres, e.g. `0.1234 µm`
pub fn format_micrometres(value_um: f64, decimals: usize) -> String {
    format!("{:.*} µm", decimals, value_um)
}

/// Format a height given in micrometres for display in `system`
pub fn format_height(value_um: f64, system: MeasurementSystem, decimals: usize) -> String {
    match system {
        MeasurementSystem::Metric => format_micrometres(value_um, decimals),
        MeasurementSystem::Imperial => {
            format!(
                "{:.*} {}",
                decimals,
                value_um * MICROINCHES_PER_MICROMETRE,
                system.height_unit()
            )
        }
    }
}
