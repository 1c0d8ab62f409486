//! Workpiece catalog
//!
//! The three surface-finish classes offered on the lab bench, with the
//! display metadata the bench views use to draw them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Surface-finish class of the workpiece under the stylus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkpieceClass {
    /// Standard machined finish
    Machined,
    /// High polish finish
    Polished,
    /// As-cast rough surface
    Rough,
}

/// Texture drawn on the workpiece swatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfacePattern {
    /// Fine vertical tool marks
    Machined,
    /// Glossy gradient
    Polished,
    /// Cross-hatched casting texture
    Rough,
}

/// Display metadata for one catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkpieceInfo {
    /// Workpiece class this entry describes
    pub class: WorkpieceClass,
    /// Human-readable name
    pub label: &'static str,
    /// One-line finish description
    pub description: &'static str,
    /// Swatch colour as a hex string
    pub color: &'static str,
    /// Swatch texture
    pub pattern: SurfacePattern,
}

impl WorkpieceClass {
    /// Every class, in the order the bench lists them
    pub const ALL: [WorkpieceClass; 3] = [
        WorkpieceClass::Machined,
        WorkpieceClass::Polished,
        WorkpieceClass::Rough,
    ];

    /// Stable lowercase identifier
    pub fn id(&self) -> &'static str {
        match self {
            WorkpieceClass::Machined => "machined",
            WorkpieceClass::Polished => "polished",
            WorkpieceClass::Rough => "rough",
        }
    }

    /// Catalog entry for this class
    pub fn info(&self) -> WorkpieceInfo {
        match self {
            WorkpieceClass::Machined => WorkpieceInfo {
                class: *self,
                label: "Machined Surface",
                description: "Standard machined finish",
                color: "#6b7280",
                pattern: SurfacePattern::Machined,
            },
            WorkpieceClass::Polished => WorkpieceInfo {
                class: *self,
                label: "Polished Surface",
                description: "High polish finish",
                color: "#94a3b8",
                pattern: SurfacePattern::Polished,
            },
            WorkpieceClass::Rough => WorkpieceInfo {
                class: *self,
                label: "Rough Cast Surface",
                description: "As-cast rough surface",
                color: "#78716c",
                pattern: SurfacePattern::Rough,
            },
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        self.info().label
    }

    /// Deterministic trend term of the surface at sample index `i`
    pub fn trend(&self, i: usize) -> f64 {
        let x = i as f64;
        match self {
            WorkpieceClass::Polished => 0.2 * (0.3 * x).sin(),
            WorkpieceClass::Machined => 0.8 * (0.5 * x).sin(),
            WorkpieceClass::Rough => 2.0 * (0.2 * x).sin() + 1.5 * (0.7 * x).cos(),
        }
    }

    /// Upper bound of the uniform noise added on top of the trend
    pub fn noise_amplitude(&self) -> f64 {
        match self {
            WorkpieceClass::Polished => 0.15,
            WorkpieceClass::Machined => 0.5,
            WorkpieceClass::Rough => 1.8,
        }
    }
}

impl fmt::Display for WorkpieceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for WorkpieceClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "machined" => Ok(Self::Machined),
            "polished" => Ok(Self::Polished),
            "rough" | "rough-cast" | "cast" => Ok(Self::Rough),
            _ => Err(format!("Unknown workpiece: {}", s)),
        }
    }
}
