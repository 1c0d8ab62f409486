//! Rig observation plumbing
//!
//! Provides:
//! - Broadcast events describing every rig state change
//! - The listener trait for step-change and completion callbacks

pub mod event;
pub mod listener;

pub use event::{EventDispatcher, RigEvent};
pub use listener::{RigListener, RigListenerHandle};
