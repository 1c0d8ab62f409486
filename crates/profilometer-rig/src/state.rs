//! The session record and its guarded mutations
//!
//! Every mutation consults [`transition`] first and leaves the record
//! untouched when the command is not accepted. The async rig only sequences
//! these calls in time.

use crate::transition::{transition, RigCommand};
use profilometer_core::{
    Profile, ProfileSample, RigPhase, Roughness, ScanStep, WorkpieceClass,
    REFERENCE_STYLUS_POSITION, SCAN_END_POSITION,
};
use serde::Serialize;

/// Instructional step for the given session flags
///
/// Priority is select > zero > scan > complete. A running scan with no
/// earlier result matches no branch and yields `None`.
pub fn derive_step(
    selected: Option<WorkpieceClass>,
    zeroed: bool,
    scanning: bool,
    ra: Option<f64>,
) -> Option<ScanStep> {
    if selected.is_none() {
        Some(ScanStep::Select)
    } else if !zeroed {
        Some(ScanStep::Zero)
    } else if !scanning && ra.is_none() {
        Some(ScanStep::Scan)
    } else if ra.is_some() {
        Some(ScanStep::Complete)
    } else {
        None
    }
}

/// Mutable session record of one lab bench
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanState {
    selected_workpiece: Option<WorkpieceClass>,
    phase: RigPhase,
    stylus_position: f64,
    profile: Profile,
    result: Option<Roughness>,
    #[serde(skip)]
    initial_position: f64,
}

impl ScanState {
    /// Empty session with the stylus parked at `initial_position`
    pub fn new(initial_position: f64) -> Self {
        Self {
            selected_workpiece: None,
            phase: RigPhase::Idle,
            stylus_position: initial_position,
            profile: Profile::new(),
            result: None,
            initial_position,
        }
    }

    /// Workpiece on the bench
    pub fn selected_workpiece(&self) -> Option<WorkpieceClass> {
        self.selected_workpiece
    }

    /// Current phase
    pub fn phase(&self) -> RigPhase {
        self.phase
    }

    /// Stylus position, from the parking position up to 100 at the end of the traverse
    pub fn stylus_position(&self) -> f64 {
        self.stylus_position
    }

    /// Samples visible so far; complete once the scan has finished
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Roughness of the last completed scan
    pub fn result(&self) -> Option<Roughness> {
        self.result
    }

    /// Arithmetic mean roughness of the last completed scan
    pub fn ra(&self) -> Option<f64> {
        self.result.map(|r| r.ra)
    }

    /// Peak-to-valley height of the last completed scan
    pub fn rz(&self) -> Option<f64> {
        self.result.map(|r| r.rz)
    }

    /// True once zeroing has completed and no reset has happened since
    pub fn is_zeroed(&self) -> bool {
        matches!(
            self.phase,
            RigPhase::Zeroed | RigPhase::Scanning | RigPhase::Complete
        )
    }

    /// True while the zero sequence runs
    pub fn is_zeroing(&self) -> bool {
        self.phase == RigPhase::Zeroing
    }

    /// True while the traverse runs
    pub fn is_scanning(&self) -> bool {
        self.phase == RigPhase::Scanning
    }

    /// Instructional step for the current flags
    pub fn step(&self) -> Option<ScanStep> {
        derive_step(
            self.selected_workpiece,
            self.is_zeroed(),
            self.is_scanning(),
            self.ra(),
        )
    }

    fn apply(&mut self, command: RigCommand) -> bool {
        match transition(self.phase, command) {
            Some(next) => {
                tracing::debug!("{}: {} -> {}", command, self.phase, next);
                self.phase = next;
                true
            }
            None => {
                tracing::debug!("Ignoring {} in phase {}", command, self.phase);
                false
            }
        }
    }

    /// Place `workpiece` on the bench, discarding zero, profile and results
    pub fn select(&mut self, workpiece: WorkpieceClass) -> bool {
        if !self.apply(RigCommand::Select(workpiece)) {
            return false;
        }
        self.selected_workpiece = Some(workpiece);
        self.stylus_position = self.initial_position;
        self.profile = Profile::new();
        self.result = None;
        true
    }

    /// Enter the zero sequence
    pub fn begin_zero(&mut self) -> bool {
        self.apply(RigCommand::StartZero)
    }

    /// First zero sub-step: the stylus touches the reference corner
    pub fn engage_reference(&mut self) -> bool {
        if !self.is_zeroing() {
            return false;
        }
        self.stylus_position = REFERENCE_STYLUS_POSITION;
        true
    }

    /// Second zero sub-step: settling done, ready to scan
    pub fn finish_zero(&mut self) -> bool {
        if !self.apply(RigCommand::ZeroSettled) {
            return false;
        }
        self.stylus_position = REFERENCE_STYLUS_POSITION;
        true
    }

    /// Enter the traverse, clearing any earlier profile and results
    pub fn begin_scan(&mut self) -> bool {
        if !self.apply(RigCommand::StartScan) {
            return false;
        }
        self.profile = Profile::new();
        self.result = None;
        true
    }

    /// Make the next sample visible and advance the stylus proportionally
    ///
    /// Samples must arrive in index order; anything else is dropped.
    pub fn record_sample(&mut self, sample: ProfileSample, total: usize) -> bool {
        if !self.is_scanning() || total == 0 {
            return false;
        }
        if let Err(e) = self.profile.push_sample(sample) {
            tracing::debug!("Dropping sample: {}", e);
            return false;
        }
        self.stylus_position = SCAN_END_POSITION * self.profile.len() as f64 / total as f64;
        true
    }

    /// Finish the traverse with the roughness of the full profile
    pub fn finish_scan(&mut self, roughness: Roughness) -> bool {
        if !self.apply(RigCommand::ScanFinished) {
            return false;
        }
        self.result = Some(roughness);
        true
    }

    /// Park the stylus and clear the zero; results are kept
    ///
    /// Ignored while busy or when the stylus is already parked.
    pub fn reset(&mut self) -> bool {
        if self.stylus_position == self.initial_position {
            tracing::debug!("Ignoring reset: stylus already parked");
            return false;
        }
        if !self.apply(RigCommand::Reset) {
            return false;
        }
        self.stylus_position = self.initial_position;
        true
    }

    /// Abort the running sequence, returning the phase that was interrupted
    pub fn cancel(&mut self) -> Option<RigPhase> {
        let interrupted = self.phase;
        if !self.apply(RigCommand::Cancel) {
            return None;
        }
        match interrupted {
            RigPhase::Zeroing => self.stylus_position = self.initial_position,
            RigPhase::Scanning => {
                self.profile = Profile::new();
                self.stylus_position = REFERENCE_STYLUS_POSITION;
            }
            _ => {}
        }
        Some(interrupted)
    }
}

impl Default for ScanState {
    fn default() -> Self {
        Self::new(profilometer_core::INITIAL_STYLUS_POSITION)
    }
}
