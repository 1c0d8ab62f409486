//! Profilometer rig
//!
//! Drives a [`ScanState`] through time. User commands apply immediately;
//! the zero and scan sequences run as spawned tokio tasks that perform one
//! atomic state mutation per timer step. The phase flags are the only
//! single-writer gate: a command that arrives while a sequence runs is
//! rejected by the transition table.
//!
//! Every sequence carries a generation number. Cancelling bumps the
//! generation, so a superseded task can never touch the state again even if
//! it wakes up before its abort lands.

use crate::config::RigConfig;
use crate::state::ScanState;
use profilometer_core::{
    compute_roughness, thread_safe_none, thread_safe_rw, thread_safe_rw_map, EventDispatcher,
    Profile, ProfileSource, RandomProfileSource, RigError, RigEvent, RigListener,
    RigListenerHandle, RigPhase, ScanResult, ScanStep, ThreadSafeOption, ThreadSafeRw,
    ThreadSafeRwMap, WorkpieceClass,
};
use std::sync::Arc;
use tokio::task::{AbortHandle, JoinHandle};
use uuid::Uuid;

/// Session record plus sequencing bookkeeping
#[derive(Debug)]
struct RigInner {
    state: ScanState,
    generation: u64,
    reported_step: Option<ScanStep>,
}

/// Observable effects of one accepted mutation
#[derive(Debug, Clone, Copy)]
struct Change {
    from: RigPhase,
    to: RigPhase,
    stylus: Option<f64>,
    step: Option<ScanStep>,
    generation: u64,
}

/// Shared handles cloned into every timer task
#[derive(Clone)]
struct RigCore {
    inner: ThreadSafeRw<RigInner>,
    listeners: ThreadSafeRwMap<String, Arc<dyn RigListener>>,
    events: EventDispatcher,
}

impl RigCore {
    /// Apply `f` to the state under the write lock
    ///
    /// With `expected_generation` set, the mutation is skipped once the
    /// sequence has been superseded. With `new_sequence`, an accepted
    /// mutation starts a new generation.
    fn mutate<F>(&self, expected_generation: Option<u64>, new_sequence: bool, f: F) -> Option<Change>
    where
        F: FnOnce(&mut ScanState) -> bool,
    {
        let mut inner = self.inner.write();
        if expected_generation.is_some_and(|g| g != inner.generation) {
            tracing::debug!("Dropping step from superseded sequence");
            return None;
        }

        let from = inner.state.phase();
        let stylus_before = inner.state.stylus_position();
        if !f(&mut inner.state) {
            return None;
        }
        if new_sequence {
            inner.generation += 1;
        }

        let stylus_after = inner.state.stylus_position();
        let derived = inner.state.step();
        let step = match derived {
            Some(step) if inner.reported_step != Some(step) => {
                inner.reported_step = Some(step);
                Some(step)
            }
            _ => None,
        };

        Some(Change {
            from,
            to: inner.state.phase(),
            stylus: (stylus_after != stylus_before).then_some(stylus_after),
            step,
            generation: inner.generation,
        })
    }

    fn listeners(&self) -> Vec<Arc<dyn RigListener>> {
        self.listeners.read().values().cloned().collect()
    }

    /// Broadcast a change and await listener callbacks in order
    async fn publish(&self, change: Change) {
        if change.from != change.to {
            tracing::info!("Rig phase {} -> {}", change.from, change.to);
            self.events.publish(RigEvent::PhaseChanged {
                from: change.from,
                to: change.to,
            });
        }
        if let Some(position) = change.stylus {
            self.events.publish(RigEvent::StylusMoved(position));
            for listener in self.listeners() {
                listener.on_stylus_moved(position).await;
            }
        }
        if let Some(step) = change.step {
            self.events.publish(RigEvent::StepChanged(step));
            for listener in self.listeners() {
                listener.on_step_changed(step).await;
            }
        }
    }

    async fn complete(&self, result: ScanResult) {
        tracing::info!(
            "Scan of {} complete: Ra {:.4}, Rz {:.4}",
            result.workpiece,
            result.ra,
            result.rz
        );
        self.events.publish(RigEvent::ScanCompleted(result));
        for listener in self.listeners() {
            listener.on_complete(&result).await;
        }
    }
}

/// Virtual contact profilometer
///
/// All command methods return `true` if the command was accepted and `false`
/// if it was ignored as out of sequence.
pub struct ProfilometerRig {
    config: RigConfig,
    core: RigCore,
    source: Arc<dyn ProfileSource>,
    task: ThreadSafeOption<JoinHandle<()>>,
    abort: ThreadSafeOption<AbortHandle>,
}

impl ProfilometerRig {
    /// Create a rig with an unseeded random profile source
    pub fn new(config: RigConfig) -> Result<Self, RigError> {
        Self::with_source(config, Arc::new(RandomProfileSource))
    }

    /// Create a rig drawing profiles from `source`
    pub fn with_source(config: RigConfig, source: Arc<dyn ProfileSource>) -> Result<Self, RigError> {
        let config = config.validated()?;
        let state = ScanState::new(config.initial_stylus_position);
        let reported_step = state.step();
        Ok(Self {
            config,
            core: RigCore {
                inner: thread_safe_rw(RigInner {
                    state,
                    generation: 0,
                    reported_step,
                }),
                listeners: thread_safe_rw_map(),
                events: EventDispatcher::default(),
            },
            source,
            task: thread_safe_none(),
            abort: thread_safe_none(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Copy of the session record
    pub fn snapshot(&self) -> ScanState {
        self.core.inner.read().state.clone()
    }

    /// Current phase
    pub fn phase(&self) -> RigPhase {
        self.core.inner.read().state.phase()
    }

    /// Current stylus position
    pub fn stylus_position(&self) -> f64 {
        self.core.inner.read().state.stylus_position()
    }

    /// Samples visible so far
    pub fn profile(&self) -> Profile {
        self.core.inner.read().state.profile().clone()
    }

    /// Last step reported to listeners
    pub fn current_step(&self) -> Option<ScanStep> {
        self.core.inner.read().reported_step
    }

    /// Result of the most recent completed scan
    pub fn result(&self) -> Option<ScanResult> {
        let inner = self.core.inner.read();
        let roughness = inner.state.result()?;
        Some(ScanResult {
            ra: roughness.ra,
            rz: roughness.rz,
            workpiece: inner.state.selected_workpiece()?,
        })
    }

    /// Subscribe to the rig's event stream
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<RigEvent> {
        self.core.events.subscribe()
    }

    /// Register a listener for step and completion callbacks
    pub fn register_listener(&self, listener: Arc<dyn RigListener>) -> RigListenerHandle {
        let id = Uuid::new_v4().to_string();
        let handle = RigListenerHandle(id.clone());
        self.core.listeners.write().insert(id, listener);
        handle
    }

    /// Remove a previously registered listener
    pub fn unregister_listener(&self, handle: RigListenerHandle) -> bool {
        self.core.listeners.write().remove(&handle.0).is_some()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.core.listeners.read().len()
    }

    /// Place `workpiece` on the bench
    ///
    /// Clears any zero, profile and results. Ignored while zeroing or scanning.
    pub async fn select_workpiece(&self, workpiece: WorkpieceClass) -> bool {
        let Some(change) = self.core.mutate(None, false, |s| s.select(workpiece)) else {
            return false;
        };
        self.core
            .events
            .publish(RigEvent::WorkpieceSelected(workpiece));
        self.core.publish(change).await;
        true
    }

    /// Start the two-step zero sequence
    pub async fn start_zero(&self) -> bool {
        let Some(change) = self.core.mutate(None, true, |s| s.begin_zero()) else {
            return false;
        };
        self.core.publish(change).await;

        let core = self.core.clone();
        let generation = change.generation;
        let engage = self.config.zero_engage_delay;
        let settle = self.config.zero_settle_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(engage).await;
            let Some(change) = core.mutate(Some(generation), false, |s| s.engage_reference())
            else {
                return;
            };
            core.publish(change).await;

            tokio::time::sleep(settle).await;
            let Some(change) = core.mutate(Some(generation), false, |s| s.finish_zero()) else {
                return;
            };
            core.publish(change).await;
        });
        self.track(handle);
        true
    }

    /// Start the traverse
    ///
    /// The whole profile is generated up front and then revealed one sample
    /// per tick. Roughness is computed once the last sample is visible.
    pub async fn start_scan(&self) -> bool {
        let (phase, selected) = {
            let inner = self.core.inner.read();
            (inner.state.phase(), inner.state.selected_workpiece())
        };
        let Some(workpiece) = selected.filter(|_| phase == RigPhase::Zeroed) else {
            tracing::debug!("Ignoring start_scan in phase {}", phase);
            return false;
        };

        let total = self.config.sample_count;
        let profile = self.source.generate(workpiece, total);
        if profile.len() != total {
            tracing::error!(
                "Profile source returned {} samples, expected {}; scan refused",
                profile.len(),
                total
            );
            return false;
        }
        tracing::debug!("Generated {} samples for {}", total, workpiece);

        let Some(change) = self.core.mutate(None, true, |s| s.begin_scan()) else {
            return false;
        };
        self.core.publish(change).await;

        let core = self.core.clone();
        let generation = change.generation;
        let tick = self.config.scan_tick;
        let handle = tokio::spawn(async move {
            for (i, sample) in profile.samples().iter().enumerate() {
                tokio::time::sleep(tick).await;
                let Some(change) =
                    core.mutate(Some(generation), false, |s| s.record_sample(*sample, total))
                else {
                    return;
                };
                core.events.publish(RigEvent::SampleRecorded {
                    sample: *sample,
                    emitted: i + 1,
                    total,
                });
                core.publish(change).await;
            }

            let roughness = match compute_roughness(&profile) {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!("Cannot finish scan: {}", e);
                    return;
                }
            };
            let Some(change) = core.mutate(Some(generation), false, |s| s.finish_scan(roughness))
            else {
                return;
            };
            let result = ScanResult {
                ra: roughness.ra,
                rz: roughness.rz,
                workpiece,
            };
            core.complete(result).await;
            core.publish(change).await;
        });
        self.track(handle);
        true
    }

    /// Park the stylus and clear the zero, keeping any results
    pub async fn reset(&self) -> bool {
        let Some(change) = self.core.mutate(None, false, |s| s.reset()) else {
            return false;
        };
        self.core.publish(change).await;
        true
    }

    /// Abort a running zero or scan sequence
    ///
    /// A cancelled zero returns to `Selected` with the stylus parked; a
    /// cancelled scan returns to `Zeroed` with the partial profile discarded.
    pub async fn cancel(&self) -> bool {
        let mut interrupted = None;
        let change = self.core.mutate(None, true, |s| {
            interrupted = s.cancel();
            interrupted.is_some()
        });
        let (Some(change), Some(phase)) = (change, interrupted) else {
            return false;
        };
        if let Some(abort) = self.abort.lock().take() {
            abort.abort();
        }
        tracing::warn!("Cancelled {} sequence", phase);
        self.core.events.publish(RigEvent::Cancelled(phase));
        self.core.publish(change).await;
        true
    }

    /// Wait for the running zero or scan sequence to finish
    pub async fn settle(&self) {
        let handle = self.task.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::error!("Rig sequence failed: {}", e);
                }
            }
        }
    }

    fn track(&self, handle: JoinHandle<()>) {
        *self.abort.lock() = Some(handle.abort_handle());
        *self.task.lock() = Some(handle);
    }
}

impl Drop for ProfilometerRig {
    fn drop(&mut self) {
        if let Some(abort) = self.abort.lock().take() {
            abort.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Mutex;

    struct TestListener {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl TestListener {
        fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl RigListener for TestListener {
        async fn on_step_changed(&self, step: ScanStep) {
            self.calls.lock().await.push(format!("step:{}", step));
        }

        async fn on_complete(&self, result: &ScanResult) {
            self.calls
                .lock()
                .await
                .push(format!("complete:{}", result.workpiece));
        }
    }

    fn fast_rig() -> ProfilometerRig {
        let config = RigConfig {
            sample_count: 8,
            ..RigConfig::default()
        }
        .with_uniform_timing(Duration::from_millis(1));
        ProfilometerRig::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_register_unregister_listener() {
        let rig = fast_rig();
        let handle = rig.register_listener(Arc::new(TestListener::new()));
        assert_eq!(rig.listener_count(), 1);
        assert!(rig.unregister_listener(handle.clone()));
        assert!(!rig.unregister_listener(handle));
        assert_eq!(rig.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_rejects_invalid_config() {
        let config = RigConfig {
            sample_count: 0,
            ..RigConfig::default()
        };
        assert!(ProfilometerRig::new(config).is_err());
    }

    #[tokio::test]
    async fn test_listener_sees_steps_and_completion() {
        let rig = fast_rig();
        let listener = Arc::new(TestListener::new());
        let calls = listener.calls.clone();
        rig.register_listener(listener);

        assert_eq!(rig.current_step(), Some(ScanStep::Select));
        assert!(rig.select_workpiece(WorkpieceClass::Machined).await);
        assert!(rig.start_zero().await);
        rig.settle().await;
        assert!(rig.start_scan().await);
        rig.settle().await;

        let calls = calls.lock().await.clone();
        assert_eq!(
            calls,
            vec![
                "step:zero".to_string(),
                "step:scan".to_string(),
                "complete:machined".to_string(),
                "step:complete".to_string(),
            ]
        );
        assert_eq!(rig.phase(), RigPhase::Complete);
        assert_eq!(rig.profile().len(), 8);
    }

    #[tokio::test]
    async fn test_commands_out_of_sequence_are_ignored() {
        let rig = fast_rig();
        assert!(!rig.start_zero().await);
        assert!(!rig.start_scan().await);
        assert!(!rig.reset().await);
        assert!(!rig.cancel().await);
        assert_eq!(rig.phase(), RigPhase::Idle);
    }
}
