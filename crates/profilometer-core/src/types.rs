//! Type aliases for shared rig state.
//!
//! The rig hands its session record, listener registry and task handles to
//! spawned timer tasks, so these are always `Arc`-wrapped `parking_lot` locks.
//!
//! ```rust,ignore
//! use profilometer_core::types::*;
//!
//! // Instead of: Arc<RwLock<ScanState>>
//! let state: ThreadSafeRw<ScanState> = thread_safe_rw(ScanState::default());
//! ```

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// A thread-safe optional wrapper, for handles that come and go.
pub type ThreadSafeOption<T> = Arc<Mutex<Option<T>>>;

/// A thread-safe read-write locked wrapper for read-heavy state.
///
/// Observers read the session record far more often than timer ticks write it.
pub type ThreadSafeRw<T> = Arc<RwLock<T>>;

/// A thread-safe read-write locked hash map.
pub type ThreadSafeRwMap<K, V> = Arc<RwLock<HashMap<K, V>>>;

/// Create an empty [`ThreadSafeOption`].
pub fn thread_safe_none<T>() -> ThreadSafeOption<T> {
    Arc::new(Mutex::new(None))
}

/// Wrap a value in [`ThreadSafeRw`].
pub fn thread_safe_rw<T>(value: T) -> ThreadSafeRw<T> {
    Arc::new(RwLock::new(value))
}

/// Create an empty [`ThreadSafeRwMap`].
pub fn thread_safe_rw_map<K, V>() -> ThreadSafeRwMap<K, V> {
    Arc::new(RwLock::new(HashMap::new()))
}
