//! Guarded transition table
//!
//! `transition(phase, command)` is the single source of truth for which
//! commands the rig accepts. `None` means the command is ignored.

use profilometer_core::{RigPhase, WorkpieceClass};
use std::fmt;

/// Commands the rig reacts to
///
/// `ZeroSettled` and `ScanFinished` are issued by the rig's own timer tasks;
/// the rest come from the user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigCommand {
    /// Place a workpiece on the bench
    Select(WorkpieceClass),
    /// Begin the zero sequence
    StartZero,
    /// Zero sequence finished settling
    ZeroSettled,
    /// Begin the traverse
    StartScan,
    /// Last sample emitted
    ScanFinished,
    /// Park the stylus and clear the zero
    Reset,
    /// Abort the running timed sequence
    Cancel,
}

impl fmt::Display for RigCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RigCommand::Select(w) => write!(f, "select({})", w),
            RigCommand::StartZero => write!(f, "start_zero"),
            RigCommand::ZeroSettled => write!(f, "zero_settled"),
            RigCommand::StartScan => write!(f, "start_scan"),
            RigCommand::ScanFinished => write!(f, "scan_finished"),
            RigCommand::Reset => write!(f, "reset"),
            RigCommand::Cancel => write!(f, "cancel"),
        }
    }
}

/// Phase reached by applying `command` in `phase`, or `None` if ignored
pub fn transition(phase: RigPhase, command: RigCommand) -> Option<RigPhase> {
    use RigCommand as C;
    use RigPhase as P;

    match (phase, command) {
        (P::Idle | P::Selected | P::Zeroed | P::Complete, C::Select(_)) => Some(P::Selected),
        (P::Selected, C::StartZero) => Some(P::Zeroing),
        (P::Zeroing, C::ZeroSettled) => Some(P::Zeroed),
        (P::Zeroed, C::StartScan) => Some(P::Scanning),
        (P::Scanning, C::ScanFinished) => Some(P::Complete),
        (P::Selected | P::Zeroed | P::Complete, C::Reset) => Some(P::Selected),
        (P::Zeroing, C::Cancel) => Some(P::Selected),
        (P::Scanning, C::Cancel) => Some(P::Zeroed),
        _ => None,
    }
}
