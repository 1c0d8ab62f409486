//! Event system for rig observation
//!
//! Provides:
//! - Event types for phase, step, stylus and sample changes
//! - Event dispatcher for publishing events to subscribers

use crate::data::{ProfileSample, RigPhase, ScanResult, ScanStep, WorkpieceClass};
use tokio::sync::broadcast;

/// Rig event types
#[derive(Debug, Clone, PartialEq)]
pub enum RigEvent {
    /// A workpiece was placed on the bench
    WorkpieceSelected(WorkpieceClass),
    /// Rig phase changed
    PhaseChanged {
        /// Phase before the transition.
        from: RigPhase,
        /// Phase after the transition.
        to: RigPhase,
    },
    /// Derived instructional step changed
    StepChanged(ScanStep),
    /// Stylus moved to a new position
    StylusMoved(f64),
    /// One more sample became visible during a scan
    SampleRecorded {
        /// The sample just appended to the partial profile.
        sample: ProfileSample,
        /// Samples visible so far, this one included.
        emitted: usize,
        /// Samples the scan will produce in total.
        total: usize,
    },
    /// Scan finished and roughness computed
    ScanCompleted(ScanResult),
    /// A timed sequence was cancelled while in the given phase
    Cancelled(RigPhase),
}

impl std::fmt::Display for RigEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RigEvent::WorkpieceSelected(w) => write!(f, "Workpiece: {}", w.label()),
            RigEvent::PhaseChanged { from, to } => write!(f, "Phase: {} -> {}", from, to),
            RigEvent::StepChanged(step) => write!(f, "Step: {}", step),
            RigEvent::StylusMoved(pos) => write!(f, "Stylus: {:.1}", pos),
            RigEvent::SampleRecorded { emitted, total, .. } => {
                write!(f, "Sample {}/{}", emitted, total)
            }
            RigEvent::ScanCompleted(r) => {
                write!(f, "Scan complete: Ra {:.4}, Rz {:.4} ({})", r.ra, r.rz, r.workpiece)
            }
            RigEvent::Cancelled(phase) => write!(f, "Cancelled during {}", phase),
        }
    }
}

/// Event dispatcher for publishing events to subscribers
#[derive(Clone)]
pub struct EventDispatcher {
    /// Broadcast sender channel for rig events.
    tx: broadcast::Sender<RigEvent>,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    ///
    /// # Arguments
    /// * `buffer_size` - Size of the broadcast buffer (default 256)
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size);
        Self { tx }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<RigEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all subscribers
    ///
    /// Returns the number of receivers; having none is not an error.
    pub fn publish(&self, event: RigEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        // A full 80-sample scan plus its phase and stylus events fits without lagging.
        Self::new(256)
    }
}
