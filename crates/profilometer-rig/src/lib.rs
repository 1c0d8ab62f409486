//! # Profilometer Rig
//!
//! The scan state machine of the virtual profilometer. Workpiece selection,
//! stylus zeroing and the sample-by-sample traverse are driven through an
//! explicit guarded transition table; out-of-order commands are ignored.
//! Zero and scan run as tokio timer sequences that can be cancelled.

pub mod config;
pub mod rig;
pub mod state;
pub mod transition;

pub use config::RigConfig;
pub use rig::ProfilometerRig;
pub use state::{derive_step, ScanState};
pub use transition::{transition, RigCommand};
