//! Data models for the measurement session
//!
//! This module provides:
//! - The workpiece catalog and its surface-finish classes
//! - Height samples and profiles
//! - Rig phases and the coarse instructional steps derived from them
//! - The result record handed to report collaborators

pub mod profile;
pub mod workpiece;

pub use profile::{Profile, ProfileSample};
pub use workpiece::{SurfacePattern, WorkpieceClass, WorkpieceInfo};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stylus position before zeroing, just off the workpiece edge
pub const INITIAL_STYLUS_POSITION: f64 = -10.0;

/// Stylus position after zeroing, at the workpiece corner
pub const REFERENCE_STYLUS_POSITION: f64 = 0.0;

/// Stylus position once the whole traverse has been scanned
pub const SCAN_END_POSITION: f64 = 100.0;

/// Lifecycle phase of the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RigPhase {
    /// No workpiece on the bench
    #[default]
    Idle,
    /// Workpiece chosen, stylus not zeroed
    Selected,
    /// Zero sequence running
    Zeroing,
    /// Stylus at the reference position, ready to scan
    Zeroed,
    /// Traverse running
    Scanning,
    /// Traverse finished and Ra/Rz available
    Complete,
}

impl RigPhase {
    /// True while a timed sequence owns the rig
    pub fn is_busy(&self) -> bool {
        matches!(self, RigPhase::Zeroing | RigPhase::Scanning)
    }
}

impl fmt::Display for RigPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RigPhase::Idle => write!(f, "Idle"),
            RigPhase::Selected => write!(f, "Selected"),
            RigPhase::Zeroing => write!(f, "Zeroing"),
            RigPhase::Zeroed => write!(f, "Zeroed"),
            RigPhase::Scanning => write!(f, "Scanning"),
            RigPhase::Complete => write!(f, "Complete"),
        }
    }
}

/// Coarse instructional step shown to the student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStep {
    /// Pick a workpiece
    Select,
    /// Zero the stylus
    Zero,
    /// Start the traverse
    Scan,
    /// Results are ready
    Complete,
}

impl ScanStep {
    /// Stable lowercase identifier
    pub fn id(&self) -> &'static str {
        match self {
            ScanStep::Select => "select",
            ScanStep::Zero => "zero",
            ScanStep::Scan => "scan",
            ScanStep::Complete => "complete",
        }
    }
}

impl fmt::Display for ScanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Result of one completed scan, as delivered to the report collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Arithmetic mean roughness
    pub ra: f64,
    /// Peak-to-valley height
    pub rz: f64,
    /// Workpiece that was scanned
    pub workpiece: WorkpieceClass,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_phases() {
        assert!(RigPhase::Zeroing.is_busy());
        assert!(RigPhase::Scanning.is_busy());
        assert!(!RigPhase::Complete.is_busy());
        assert_eq!(RigPhase::default(), RigPhase::Idle);
    }

    #[test]
    fn test_step_ids() {
        assert_eq!(ScanStep::Select.to_string(), "select");
        assert_eq!(
            serde_json::to_string(&ScanStep::Complete).unwrap(),
            "\"complete\""
        );
    }

    #[test]
    fn test_scan_result_serializes_workpiece_id() {
        let result = ScanResult {
            ra: 0.5,
            rz: 2.0,
            workpiece: WorkpieceClass::Machined,
        };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["workpiece"], "machined");
        assert_eq!(json["ra"], 0.5);
    }
}
