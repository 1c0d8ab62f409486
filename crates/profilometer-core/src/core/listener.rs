//! Rig listener interface
//!
//! Defines the listener trait for the collaborator callbacks of the rig

use crate::data::{ScanResult, ScanStep};
use async_trait::async_trait;

/// Handle for a registered rig listener.
///
/// Uniquely identifies a listener subscription. Can be used to unsubscribe
/// from rig callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RigListenerHandle(pub String);

/// Listener trait for rig callbacks
///
/// Implement this trait to drive instructional prompts and reports. Callbacks
/// are awaited in order on the task that caused the change.
#[async_trait]
pub trait RigListener: Send + Sync {
    /// Called when the derived instructional step changes
    async fn on_step_changed(&self, _step: ScanStep) {}

    /// Called exactly once per completed scan
    async fn on_complete(&self, _result: &ScanResult) {}

    /// Called whenever the stylus moves
    async fn on_stylus_moved(&self, _position: f64) {}
}
